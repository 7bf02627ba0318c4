//! Claims DTOs
//!
//! Claims serialize with their domain (camelCase) representation; the DTOs
//! here are the envelopes around them.

use serde::Serialize;

use domain_claims::Claim;

/// Response for a successfully processed intake
#[derive(Debug, Serialize)]
pub struct CreateClaimResponse {
    pub message: String,
    pub claim: Claim,
}

/// Response for a deleted claim
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
