//! Property-based test data generators

use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;

use domain_claims::{ClaimStatus, DenialRisk};

/// A random realistic patient name
pub fn fake_patient_name() -> String {
    Name().fake()
}

/// A random realistic insurance company name
pub fn fake_insurance_company() -> String {
    CompanyName().fake()
}

/// Strategy producing valid denial risks across the full range
pub fn arb_denial_risk() -> impl Strategy<Value = DenialRisk> {
    (0.0f64..=1.0).prop_map(|v| DenialRisk::new(v).expect("range-bound value"))
}

/// Strategy producing any claim status
pub fn arb_claim_status() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Processed),
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Denied),
        Just(ClaimStatus::Paid),
    ]
}

/// Strategy producing plausible CPT code lists
pub fn arb_cpt_codes() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[0-9]{5}", 0..6)
}
