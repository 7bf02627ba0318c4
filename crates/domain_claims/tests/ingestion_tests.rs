//! Ingestion workflow tests
//!
//! Every failure exit of the state machine is driven through the in-memory
//! fakes, which record stores and deletes so cleanup can be asserted exactly.

use std::sync::Arc;

use domain_claims::{ClaimError, ClaimStatus, ClaimStore, IngestionWorkflow};
use test_utils::{
    clinical_doc_upload, extraction_with_risk, insurance_card_upload, InMemoryClaimStore,
    InMemoryFileStore, StubExtractor,
};

struct Harness {
    files: Arc<InMemoryFileStore>,
    claims: Arc<InMemoryClaimStore>,
    workflow: IngestionWorkflow,
}

fn harness(extractor: StubExtractor) -> Harness {
    let files = Arc::new(InMemoryFileStore::new());
    let claims = Arc::new(InMemoryClaimStore::new());
    let workflow = IngestionWorkflow::new(files.clone(), Arc::new(extractor), claims.clone());
    Harness {
        files,
        claims,
        workflow,
    }
}

#[tokio::test]
async fn test_successful_ingestion_creates_one_claim() {
    let h = harness(StubExtractor::succeeding());

    let claim = h
        .workflow
        .ingest(insurance_card_upload(), clinical_doc_upload())
        .await
        .unwrap();

    assert_eq!(claim.status, ClaimStatus::Processed);
    assert_eq!(claim.patient_name, "Jane Doe");
    assert!(claim.insurance_card_image_path.starts_with("/uploads/insuranceCard-"));
    assert!(claim.clinical_doc_image_path.starts_with("/uploads/clinicalDoc-"));

    assert_eq!(h.claims.len(), 1);
    assert_eq!(h.files.file_count(), 2);
    assert!(h.files.contains(&claim.insurance_card_image_path));
    assert!(h.files.contains(&claim.clinical_doc_image_path));
    assert!(h.files.deleted_paths().is_empty());
}

#[tokio::test]
async fn test_risk_value_passes_through_unchanged() {
    let h = harness(StubExtractor::with_result(extraction_with_risk(0.42)));

    let claim = h
        .workflow
        .ingest(insurance_card_upload(), clinical_doc_upload())
        .await
        .unwrap();

    assert_eq!(claim.estimated_denial_risk.unwrap().value(), 0.42);
    let stored = h.claims.get(claim.id).await.unwrap().unwrap();
    assert_eq!(stored.estimated_denial_risk.unwrap().value(), 0.42);
}

#[tokio::test]
async fn test_application_failure_cleans_up_both_files() {
    let h = harness(StubExtractor::failing_application("nothing legible"));

    let err = h
        .workflow
        .ingest(insurance_card_upload(), clinical_doc_upload())
        .await
        .unwrap_err();

    assert!(matches!(err, ClaimError::ExtractionApplication(_)));
    assert!(h.claims.is_empty());
    assert_eq!(h.files.file_count(), 0);
    assert_eq!(h.files.deleted_paths().len(), 2);
}

#[tokio::test]
async fn test_network_failure_cleans_up_both_files() {
    let h = harness(StubExtractor::failing_network("connection refused"));

    let err = h
        .workflow
        .ingest(insurance_card_upload(), clinical_doc_upload())
        .await
        .unwrap_err();

    assert!(matches!(err, ClaimError::ExtractionNetwork(_)));
    assert!(err.is_transient());
    assert!(h.claims.is_empty());
    assert_eq!(h.files.file_count(), 0);
}

#[tokio::test]
async fn test_store_failure_stores_nothing() {
    let h = harness(StubExtractor::succeeding());
    h.files.fail_stores(true);

    let err = h
        .workflow
        .ingest(insurance_card_upload(), clinical_doc_upload())
        .await
        .unwrap_err();

    assert!(matches!(err, ClaimError::Storage(_)));
    assert!(h.claims.is_empty());
    assert_eq!(h.files.file_count(), 0);
}

#[tokio::test]
async fn test_persistence_failure_leaves_files_for_recovery() {
    let h = harness(StubExtractor::succeeding());
    h.claims.fail_inserts(true);

    let err = h
        .workflow
        .ingest(insurance_card_upload(), clinical_doc_upload())
        .await
        .unwrap_err();

    assert!(matches!(err, ClaimError::Persistence(_)));
    assert!(err.is_transient());
    // Extraction succeeded, so the files stay on disk and their paths
    // are logged rather than rolled back.
    assert_eq!(h.files.file_count(), 2);
    assert!(h.files.deleted_paths().is_empty());
}

#[tokio::test]
async fn test_concurrent_identical_filenames_never_collide() {
    let h = harness(StubExtractor::succeeding());
    let workflow = Arc::new(h.workflow);

    let card = || {
        let mut upload = insurance_card_upload();
        upload.original_name = "card.png".to_string();
        upload
    };
    let doc = || {
        let mut upload = clinical_doc_upload();
        upload.original_name = "card.png".to_string();
        upload
    };

    let w1 = workflow.clone();
    let w2 = workflow.clone();
    let (a, b) = tokio::join!(
        async move { w1.ingest(card(), doc()).await },
        async move { w2.ingest(card(), doc()).await },
    );
    let a = a.unwrap();
    let b = b.unwrap();

    let mut paths = vec![
        a.insurance_card_image_path,
        a.clinical_doc_image_path,
        b.insurance_card_image_path,
        b.clinical_doc_image_path,
    ];
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 4);
    assert_eq!(h.files.file_count(), 4);
}
