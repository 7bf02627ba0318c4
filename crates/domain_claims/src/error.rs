//! Claims domain errors

use thiserror::Error;

/// Errors that can occur on the claims intake path
///
/// The variants mirror the failure exits of the ingestion state machine:
/// upload validation, file storage, the external extraction call (split into
/// network-level and application-level failures), and persistence.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Extraction service unreachable: {0}")]
    ExtractionNetwork(String),

    #[error("Extraction failed: {0}")]
    ExtractionApplication(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("File storage error: {0}")]
    Storage(String),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        ClaimError::NotFound(id.to_string())
    }

    pub fn extraction_network(message: impl Into<String>) -> Self {
        ClaimError::ExtractionNetwork(message.into())
    }

    pub fn extraction_application(message: impl Into<String>) -> Self {
        ClaimError::ExtractionApplication(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ClaimError::Persistence(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ClaimError::Storage(message.into())
    }

    /// Returns true if this failure may succeed on a plain retry.
    ///
    /// `ExtractionApplication` is deliberately excluded: the service ran and
    /// declined the same input, so retrying unchanged input is not safe.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClaimError::ExtractionNetwork(_) | ClaimError::Persistence(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::NotFound(_))
    }
}
