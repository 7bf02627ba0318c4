//! Extraction Service Client
//!
//! Adapter for the external AI document-extraction service. The service is a
//! black box: two files go out as one multipart request, structured JSON or
//! an error comes back. This crate does the schema validation at that
//! boundary and nothing else - no retries, no interpretation of the content.

pub mod client;
pub mod wire;

pub use client::{ExtractionClient, ExtractionClientConfig, DEFAULT_TIMEOUT_SECS};
