//! Multipart upload receiver
//!
//! Parses and validates the two-file claim submission before anything is
//! written to disk: both named parts must be present, non-empty, and within
//! the per-file size limit. A request failing here has no side effects, so
//! no cleanup is ever needed for a 400.

use axum::extract::Multipart;

use domain_claims::DocumentUpload;

use crate::error::ApiError;

/// Multipart field name for the insurance card image
pub const INSURANCE_CARD_FIELD: &str = "insuranceCard";

/// Multipart field name for the clinical document
pub const CLINICAL_DOC_FIELD: &str = "clinicalDoc";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Extracts and validates both claim documents from a multipart request
///
/// Unknown fields are ignored; each named part may appear at most once and a
/// duplicate is rejected. Returns `(insurance_card, clinical_doc)`.
pub async fn receive_claim_documents(
    multipart: &mut Multipart,
    max_upload_bytes: usize,
) -> Result<(DocumentUpload, DocumentUpload), ApiError> {
    let mut insurance_card: Option<DocumentUpload> = None;
    let mut clinical_doc: Option<DocumentUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let slot = match name.as_str() {
            INSURANCE_CARD_FIELD => &mut insurance_card,
            CLINICAL_DOC_FIELD => &mut clinical_doc,
            _ => continue,
        };
        if slot.is_some() {
            return Err(ApiError::bad_request(format!(
                "Field '{name}' must appear exactly once"
            )));
        }

        let original_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read '{name}': {e}")))?;

        if bytes.is_empty() {
            return Err(ApiError::bad_request(format!("File '{name}' is empty")));
        }
        if bytes.len() > max_upload_bytes {
            return Err(ApiError::bad_request(format!(
                "File '{name}' exceeds the {max_upload_bytes} byte limit"
            )));
        }

        *slot = Some(DocumentUpload::new(
            name,
            original_name,
            content_type,
            bytes.to_vec(),
        ));
    }

    match (insurance_card, clinical_doc) {
        (Some(card), Some(doc)) => Ok((card, doc)),
        _ => Err(ApiError::bad_request(
            "Both insurance card and clinical document are required",
        )),
    }
}
