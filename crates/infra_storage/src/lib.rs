//! File Storage Infrastructure
//!
//! On-disk implementation of the domain's `FileStore` port. Uploads land in
//! a single configured directory and are served statically under `/uploads`.

pub mod disk;

pub use disk::DiskFileStore;
