//! Claims handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use tracing::{debug, warn};
use uuid::Uuid;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStore, FileStore};

use crate::dto::claims::{CreateClaimResponse, MessageResponse};
use crate::error::ApiError;
use crate::upload::receive_claim_documents;
use crate::AppState;

/// Creates a claim from a two-file submission
///
/// Entry point into the ingestion workflow: validate the upload, store the
/// files, call the extraction service, persist the result.
pub async fn create_claim(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateClaimResponse>, ApiError> {
    let (insurance_card, clinical_doc) =
        receive_claim_documents(&mut multipart, state.config.max_upload_bytes).await?;

    let claim = state.workflow.ingest(insurance_card, clinical_doc).await?;

    Ok(Json(CreateClaimResponse {
        message: "Claim processed successfully!".to_string(),
        claim,
    }))
}

/// Lists all claims, newest first
pub async fn list_claims(State(state): State<AppState>) -> Result<Json<Vec<Claim>>, ApiError> {
    let claims = state.claims.list_newest_first().await?;
    Ok(Json(claims))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Claim>, ApiError> {
    let claim = state
        .claims
        .get(ClaimId::from_uuid(id))
        .await?
        .ok_or_else(|| ApiError::not_found("Claim not found"))?;

    Ok(Json(claim))
}

/// Deletes a claim and its two stored files
///
/// An unknown id is a 404 with no side effects. File removal runs before the
/// record delete and before the response; a missing file is tolerated, a
/// failed delete is logged without failing the request.
pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ClaimId::from_uuid(id);
    let claim = state
        .claims
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Claim not found"))?;

    for path in [
        &claim.insurance_card_image_path,
        &claim.clinical_doc_image_path,
    ] {
        match state.files.delete(path).await {
            Ok(true) => {}
            Ok(false) => debug!(%path, "stored file already absent during claim delete"),
            Err(e) => warn!(%path, error = %e, "failed to remove stored file during claim delete"),
        }
    }

    if !state.claims.delete(id).await? {
        // Lost a race with another delete
        return Err(ApiError::not_found("Claim not found"));
    }

    Ok(Json(MessageResponse {
        message: "Claim deleted successfully".to_string(),
    }))
}
