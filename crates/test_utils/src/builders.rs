//! Test Data Builders
//!
//! Builder patterns for constructing test claims with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, Utc};
use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus, DenialRisk};

/// Builder for test claims
pub struct TestClaimBuilder {
    id: ClaimId,
    patient_name: String,
    insurance_company: String,
    proposed_cpt_codes: Vec<String>,
    proposed_icd_codes: Vec<String>,
    estimated_denial_risk: Option<f64>,
    status: ClaimStatus,
    created_at: DateTime<Utc>,
    insurance_card_image_path: String,
    clinical_doc_image_path: String,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            patient_name: "Jane Doe".to_string(),
            insurance_company: "Acme Health".to_string(),
            proposed_cpt_codes: vec!["99213".to_string()],
            proposed_icd_codes: vec!["I10".to_string()],
            estimated_denial_risk: Some(0.12),
            status: ClaimStatus::Processed,
            created_at: Utc::now(),
            insurance_card_image_path: "/uploads/insuranceCard-0-0.png".to_string(),
            clinical_doc_image_path: "/uploads/clinicalDoc-0-0.pdf".to_string(),
        }
    }

    pub fn with_patient_name(mut self, name: impl Into<String>) -> Self {
        self.patient_name = name.into();
        self
    }

    pub fn with_insurance_company(mut self, company: impl Into<String>) -> Self {
        self.insurance_company = company.into();
        self
    }

    pub fn with_cpt_codes(mut self, codes: Vec<String>) -> Self {
        self.proposed_cpt_codes = codes;
        self
    }

    pub fn with_risk(mut self, risk: f64) -> Self {
        self.estimated_denial_risk = Some(risk);
        self
    }

    pub fn without_risk(mut self) -> Self {
        self.estimated_denial_risk = None;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_file_paths(
        mut self,
        insurance_card: impl Into<String>,
        clinical_doc: impl Into<String>,
    ) -> Self {
        self.insurance_card_image_path = insurance_card.into();
        self.clinical_doc_image_path = clinical_doc.into();
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        Claim {
            id: self.id,
            patient_name: self.patient_name,
            date_of_birth: None,
            insurance_company: self.insurance_company,
            policy_number: None,
            group_number: None,
            proposed_cpt_codes: self.proposed_cpt_codes,
            proposed_icd_codes: self.proposed_icd_codes,
            estimated_denial_risk: self
                .estimated_denial_risk
                .map(|r| DenialRisk::new(r).expect("builder risk must be in [0, 1]")),
            raw_ocr_text: None,
            ai_confidence: None,
            insurance_card_image_path: self.insurance_card_image_path,
            clinical_doc_image_path: self.clinical_doc_image_path,
            status: self.status,
            created_at: self.created_at,
            submitted_at: None,
        }
    }
}
