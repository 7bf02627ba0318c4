//! Port traits for the claims intake domain
//!
//! The ingestion workflow depends only on these traits, so infrastructure
//! (PostgreSQL, local disk, the extraction service) can be swapped for
//! in-memory fakes in tests and cleanup behavior asserted deterministically.

use async_trait::async_trait;
use std::path::PathBuf;

use core_kernel::ClaimId;

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::extraction::ExtractionResult;

/// An uploaded document, validated by the upload receiver
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Multipart field name, also the stored filename prefix
    pub field: String,
    /// Original client filename
    pub original_name: String,
    /// Declared MIME type
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(
        field: impl Into<String>,
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field: field.into(),
            original_name: original_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Metadata of a durably stored upload
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Absolute location on disk (or the fake's key)
    pub disk_path: PathBuf,
    /// Public path the file is served under, e.g. `/uploads/<name>`
    pub public_path: String,
    /// Original client filename
    pub original_name: String,
    /// Declared MIME type
    pub content_type: String,
    /// Stored size in bytes
    pub size: u64,
}

/// Exclusive owner of claim records
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Persists a new claim
    async fn insert(&self, claim: &Claim) -> Result<(), ClaimError>;

    /// Fetches one claim, `None` if the id does not resolve
    async fn get(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError>;

    /// Returns all claims ordered by `created_at` descending
    async fn list_newest_first(&self) -> Result<Vec<Claim>, ClaimError>;

    /// Removes a claim record; returns false if it did not exist
    async fn delete(&self, id: ClaimId) -> Result<bool, ClaimError>;
}

/// Durable storage for uploaded files
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Writes the upload under a collision-resistant name
    async fn store(&self, upload: &DocumentUpload) -> Result<StoredFile, ClaimError>;

    /// Removes a stored file by public path
    ///
    /// Returns `Ok(false)` when the file is already absent; that is not a
    /// failure, deletes must be idempotent.
    async fn delete(&self, public_path: &str) -> Result<bool, ClaimError>;
}

/// Client for the external document-extraction service
///
/// A pure proxy: no retries, no local validation beyond the schema check at
/// the response boundary.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(
        &self,
        insurance_card: &DocumentUpload,
        clinical_doc: &DocumentUpload,
    ) -> Result<ExtractionResult, ClaimError>;
}
