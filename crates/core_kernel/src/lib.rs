//! Core Kernel - Foundational types for the claims intake system
//!
//! This crate provides the building blocks shared by every other crate,
//! currently the strongly-typed identifiers. Error taxonomies live with the
//! layer that produces them.

pub mod identifiers;

pub use identifiers::ClaimId;
