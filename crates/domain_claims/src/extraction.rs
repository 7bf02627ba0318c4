//! Validated extraction results
//!
//! The extraction service is an opaque collaborator returning loosely-typed
//! JSON. Everything crossing that boundary is validated here before it can
//! reach a Claim: required fields must be present and the denial risk must be
//! inside [0, 1]. A response that fails validation is an application-level
//! extraction failure, not a malformed claim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ClaimError;
use crate::risk::DenialRisk;

/// Structured fields extracted from the two documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedClaimData {
    pub patient_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub insurance_company: String,
    pub policy_number: Option<String>,
    pub group_number: Option<String>,
    pub proposed_cpt_codes: Vec<String>,
    pub proposed_icd_codes: Vec<String>,
    pub estimated_denial_risk: Option<DenialRisk>,
}

/// A validated, successful extraction
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub fields: ExtractedClaimData,
    /// Raw OCR text as produced by the service
    pub raw_text: Option<String>,
    /// Overall confidence reported by the service
    pub confidence: Option<f64>,
}

impl ExtractionResult {
    /// Builds a validated result from the raw pieces of a service response
    ///
    /// `patient_name` and `insurance_company` are the two fields the claim
    /// schema requires; a response missing either is rejected. The denial
    /// risk is range-checked through [`DenialRisk`].
    pub fn try_new(
        patient_name: Option<String>,
        date_of_birth: Option<NaiveDate>,
        insurance_company: Option<String>,
        policy_number: Option<String>,
        group_number: Option<String>,
        proposed_cpt_codes: Vec<String>,
        proposed_icd_codes: Vec<String>,
        estimated_denial_risk: Option<f64>,
        raw_text: Option<String>,
        confidence: Option<f64>,
    ) -> Result<Self, ClaimError> {
        let patient_name = non_empty(patient_name)
            .ok_or_else(|| missing_field("patient_name"))?;
        let insurance_company = non_empty(insurance_company)
            .ok_or_else(|| missing_field("insurance_company"))?;

        let estimated_denial_risk = estimated_denial_risk
            .map(DenialRisk::new)
            .transpose()
            .map_err(|e| {
                ClaimError::extraction_application(format!(
                    "Extraction response failed schema validation: {e}"
                ))
            })?;

        Ok(Self {
            fields: ExtractedClaimData {
                patient_name,
                date_of_birth,
                insurance_company,
                policy_number: non_empty(policy_number),
                group_number: non_empty(group_number),
                proposed_cpt_codes,
                proposed_icd_codes,
                estimated_denial_risk,
            },
            raw_text,
            confidence,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn missing_field(field: &str) -> ClaimError {
    ClaimError::extraction_application(format!(
        "Extraction response failed schema validation: missing required field '{field}'"
    ))
}
