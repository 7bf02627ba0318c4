//! Pre-built test data
//!
//! Small, deterministic fixtures for the common case: one valid insurance
//! card upload, one valid clinical document upload, and the extraction
//! result the stub service returns for them.

use domain_claims::{DocumentUpload, ExtractionResult};

/// A minimal valid PNG file (8-byte signature plus truncated IHDR)
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D]);
    bytes.extend_from_slice(b"IHDR");
    bytes.resize(2048, 0);
    bytes
}

/// A PDF-looking payload of the given size
pub fn pdf_bytes(size: usize) -> Vec<u8> {
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(size.max(9), b' ');
    bytes
}

/// Insurance card upload fixture (2 KiB PNG)
pub fn insurance_card_upload() -> DocumentUpload {
    DocumentUpload::new("insuranceCard", "card.png", "image/png", png_bytes())
}

/// Clinical document upload fixture (500 KiB PDF)
pub fn clinical_doc_upload() -> DocumentUpload {
    DocumentUpload::new(
        "clinicalDoc",
        "notes.pdf",
        "application/pdf",
        pdf_bytes(500 * 1024),
    )
}

/// The extraction result the stub service returns by default
pub fn sample_extraction() -> ExtractionResult {
    ExtractionResult::try_new(
        Some("Jane Doe".to_string()),
        Some(chrono::NaiveDate::from_ymd_opt(1985, 3, 14).unwrap()),
        Some("Acme Health".to_string()),
        Some("PN-448812".to_string()),
        Some("GRP-9920".to_string()),
        vec!["99213".to_string()],
        vec!["I10".to_string()],
        Some(0.12),
        Some("INSURANCE CARD TEXT:\nAcme Health\nJane Doe".to_string()),
        Some(0.93),
    )
    .expect("sample extraction fixture must be valid")
}

/// An extraction result carrying a specific denial risk
pub fn extraction_with_risk(risk: f64) -> ExtractionResult {
    ExtractionResult::try_new(
        Some("Jane Doe".to_string()),
        None,
        Some("Acme Health".to_string()),
        None,
        None,
        vec!["99213".to_string()],
        vec![],
        Some(risk),
        None,
        None,
    )
    .expect("risk fixture must be valid")
}
