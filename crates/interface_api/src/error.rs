//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Extraction service unreachable: {0}")]
    ExtractionUnreachable(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::ExtractionUnreachable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "extraction_unreachable",
                msg.clone(),
            ),
            ApiError::ExtractionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "extraction_failed",
                msg.clone(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation(msg) => ApiError::BadRequest(msg),
            ClaimError::NotFound(msg) => ApiError::NotFound(msg),
            ClaimError::ExtractionNetwork(msg) => ApiError::ExtractionUnreachable(msg),
            ClaimError::ExtractionApplication(msg) => ApiError::ExtractionFailed(msg),
            ClaimError::Persistence(msg) | ClaimError::Storage(msg) => ApiError::Internal(msg),
            ClaimError::InvalidStatusTransition { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}
