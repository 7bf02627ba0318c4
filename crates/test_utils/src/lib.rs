//! Test Utilities Crate
//!
//! Provides shared test infrastructure for the claims intake test suite.
//!
//! # Modules
//!
//! - `fakes`: In-memory implementations of the three domain ports, with
//!   recording hooks so cleanup behavior can be asserted deterministically
//! - `builders`: Builder patterns for test data construction
//! - `fixtures`: Pre-built uploads and extraction results
//! - `generators`: Property-based test data generators

pub mod builders;
pub mod fakes;
pub mod fixtures;
pub mod generators;

pub use builders::*;
pub use fakes::*;
pub use fixtures::*;
pub use generators::*;
