//! Claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::ClaimId;

use crate::error::ClaimError;
use crate::extraction::ExtractionResult;
use crate::risk::DenialRisk;

/// Claim status
///
/// Every claim starts as `Processed` (extraction succeeded and the record was
/// persisted) and moves forward through submission and adjudication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Extraction complete, record persisted
    Processed,
    /// Submitted to the payer
    Submitted,
    /// Approved by the payer
    Approved,
    /// Denied by the payer
    Denied,
    /// Payment received
    Paid,
}

impl ClaimStatus {
    /// Returns the wire representation used in JSON and the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Processed => "processed",
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Paid => "paid",
        }
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        ClaimStatus::Processed
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(ClaimStatus::Processed),
            "submitted" => Ok(ClaimStatus::Submitted),
            "approved" => Ok(ClaimStatus::Approved),
            "denied" => Ok(ClaimStatus::Denied),
            "paid" => Ok(ClaimStatus::Paid),
            other => Err(ClaimError::validation(format!(
                "Unknown claim status '{other}'"
            ))),
        }
    }
}

/// A processed intake claim
///
/// Identity and `created_at` are fixed at creation; the only mutation after
/// that is a status transition. The two image paths reference files owned by
/// the file store whose lifecycle is tied to this record on delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Unique identifier (time-ordered)
    pub id: ClaimId,
    /// Patient full name
    pub patient_name: String,
    /// Patient date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Insurance company name
    pub insurance_company: String,
    /// Policy number from the insurance card
    pub policy_number: Option<String>,
    /// Group number from the insurance card
    pub group_number: Option<String>,
    /// Proposed procedure codes, in service order
    pub proposed_cpt_codes: Vec<String>,
    /// Proposed diagnosis codes, in service order
    pub proposed_icd_codes: Vec<String>,
    /// Estimated probability of denial
    pub estimated_denial_risk: Option<DenialRisk>,
    /// Raw OCR text, kept for diagnostics
    pub raw_ocr_text: Option<String>,
    /// Extraction confidence reported by the service
    pub ai_confidence: Option<f64>,
    /// Public path of the stored insurance card image
    pub insurance_card_image_path: String,
    /// Public path of the stored clinical document
    pub clinical_doc_image_path: String,
    /// Status
    pub status: ClaimStatus,
    /// Created timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Set when the claim is submitted to the payer
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Creates a claim from a successful extraction and the two stored files
    pub fn from_extraction(
        extraction: ExtractionResult,
        insurance_card_image_path: String,
        clinical_doc_image_path: String,
    ) -> Self {
        let fields = extraction.fields;
        Self {
            id: ClaimId::new_v7(),
            patient_name: fields.patient_name,
            date_of_birth: fields.date_of_birth,
            insurance_company: fields.insurance_company,
            policy_number: fields.policy_number,
            group_number: fields.group_number,
            proposed_cpt_codes: fields.proposed_cpt_codes,
            proposed_icd_codes: fields.proposed_icd_codes,
            estimated_denial_risk: fields.estimated_denial_risk,
            raw_ocr_text: extraction.raw_text,
            ai_confidence: extraction.confidence,
            insurance_card_image_path,
            clinical_doc_image_path,
            status: ClaimStatus::Processed,
            created_at: Utc::now(),
            submitted_at: None,
        }
    }

    /// Updates the status, rejecting transitions outside the lifecycle
    pub fn update_status(&mut self, status: ClaimStatus) -> Result<(), ClaimError> {
        if !self.can_transition_to(status) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }
        if status == ClaimStatus::Submitted {
            self.submitted_at = Some(Utc::now());
        }
        self.status = status;
        Ok(())
    }

    /// Submits the claim to the payer, stamping `submitted_at`
    pub fn submit(&mut self) -> Result<(), ClaimError> {
        self.update_status(ClaimStatus::Submitted)
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Processed, Submitted)
                | (Submitted, Approved)
                | (Submitted, Denied)
                | (Approved, Paid)
        )
    }
}
