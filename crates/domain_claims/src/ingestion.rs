//! Claim ingestion workflow
//!
//! The one coordination point in the system: it ties file storage, the
//! extraction client, and the claim store into a single operation that looks
//! atomic to the caller, even though the three steps share no transaction.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::ports::{ClaimStore, DocumentExtractor, DocumentUpload, FileStore};

/// Orchestrates upload storage, extraction, and persistence
///
/// Constructed once at startup with the concrete adapters and shared across
/// requests; each `ingest` call runs independently.
pub struct IngestionWorkflow {
    files: Arc<dyn FileStore>,
    extractor: Arc<dyn DocumentExtractor>,
    claims: Arc<dyn ClaimStore>,
}

impl IngestionWorkflow {
    pub fn new(
        files: Arc<dyn FileStore>,
        extractor: Arc<dyn DocumentExtractor>,
        claims: Arc<dyn ClaimStore>,
    ) -> Self {
        Self {
            files,
            extractor,
            claims,
        }
    }

    /// Runs one ingestion: store both files, extract, persist
    ///
    /// Upload presence and size have already been validated by the caller;
    /// by the time this runs, both documents are in memory.
    ///
    /// Failure semantics:
    /// - either store fails: nothing already stored is left behind
    ///   (best-effort delete), the storage error is returned;
    /// - extraction fails for any reason: both stored files are deleted
    ///   best-effort, the extraction error is returned, no claim exists;
    /// - persistence fails: the files stay on disk, both paths are logged at
    ///   error level for manual recovery, the persistence error is returned.
    pub async fn ingest(
        &self,
        insurance_card: DocumentUpload,
        clinical_doc: DocumentUpload,
    ) -> Result<Claim, ClaimError> {
        let card = self.files.store(&insurance_card).await?;
        info!(path = %card.public_path, size = card.size, "stored insurance card");

        let doc = match self.files.store(&clinical_doc).await {
            Ok(doc) => doc,
            Err(e) => {
                self.discard(&card.public_path).await;
                return Err(e);
            }
        };
        info!(path = %doc.public_path, size = doc.size, "stored clinical document");

        let extraction = match self.extractor.extract(&insurance_card, &clinical_doc).await {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(error = %e, "extraction failed, removing stored files");
                self.discard(&card.public_path).await;
                self.discard(&doc.public_path).await;
                return Err(e);
            }
        };

        let claim = Claim::from_extraction(extraction, card.public_path, doc.public_path);

        if let Err(e) = self.claims.insert(&claim).await {
            // No automatic rollback here: the extraction already succeeded
            // and the caller would have to re-upload to retry. The paths are
            // logged so the orphaned files can be recovered manually.
            error!(
                error = %e,
                insurance_card_path = %claim.insurance_card_image_path,
                clinical_doc_path = %claim.clinical_doc_image_path,
                "claim persistence failed after successful extraction; stored files are orphaned"
            );
            return Err(e);
        }

        info!(claim_id = %claim.id, patient = %claim.patient_name, "claim ingested");
        Ok(claim)
    }

    /// Best-effort delete during cleanup
    ///
    /// A failed delete is logged and swallowed so it cannot mask the error
    /// that triggered the cleanup.
    async fn discard(&self, public_path: &str) {
        match self.files.delete(public_path).await {
            Ok(_) => {}
            Err(e) => {
                warn!(path = %public_path, error = %e, "failed to remove stored file during cleanup");
            }
        }
    }
}
