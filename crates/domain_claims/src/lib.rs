//! Claims Intake Domain
//!
//! This crate implements the claims intake lifecycle: two uploaded documents
//! are stored, sent to an external extraction service, and persisted as a
//! Claim record.
//!
//! # Ingestion state machine
//!
//! ```text
//! Received -> FilesStored -> Extracted -> Persisted
//!     |            |             |
//!     v            v             v
//! RejectedInvalidUpload   FailedExtraction   FailedPersistence
//!                         (files cleaned up) (files orphaned, logged)
//! ```

pub mod claim;
pub mod error;
pub mod extraction;
pub mod ingestion;
pub mod ports;
pub mod risk;
pub mod stats;

pub use claim::{Claim, ClaimStatus};
pub use error::ClaimError;
pub use extraction::{ExtractedClaimData, ExtractionResult};
pub use ingestion::IngestionWorkflow;
pub use ports::{ClaimStore, DocumentExtractor, DocumentUpload, FileStore, StoredFile};
pub use risk::{DenialRisk, RiskError};
pub use stats::DashboardStats;
