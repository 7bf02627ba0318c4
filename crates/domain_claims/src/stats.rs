//! Dashboard aggregate statistics
//!
//! Recomputed from scratch over the full claim list on every call; there is
//! no incremental state to keep consistent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::claim::{Claim, ClaimStatus};

/// Mock reimbursement value per proposed CPT code, in USD
///
/// A placeholder figure for the dashboard, not a pricing model.
pub const MOCK_VALUE_PER_CPT_CODE: Decimal = dec!(150);

/// Aggregate figures for the claims dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total number of claims
    pub total: u64,
    /// Claims with status `processed`
    pub processed: u64,
    /// Claims with denial risk above the high-risk threshold (0.3)
    pub high_risk: u64,
    /// Approval-rate estimate as a whole percentage:
    /// `round((1 - likely_denials / total) * 100)`
    pub success_rate: u32,
    /// Mock monetary total: 150 USD per proposed CPT code
    pub total_value: Decimal,
}

impl DashboardStats {
    /// Computes the dashboard figures from the full claim list
    pub fn compute(claims: &[Claim]) -> Self {
        let total = claims.len() as u64;
        let processed = claims
            .iter()
            .filter(|c| c.status == ClaimStatus::Processed)
            .count() as u64;
        let high_risk = claims
            .iter()
            .filter(|c| c.estimated_denial_risk.is_some_and(|r| r.is_high()))
            .count() as u64;
        let likely_denials = claims
            .iter()
            .filter(|c| c.estimated_denial_risk.is_some_and(|r| r.is_likely_denial()))
            .count();

        let success_rate = if total > 0 {
            ((1.0 - likely_denials as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let code_count: u64 = claims.iter().map(|c| c.proposed_cpt_codes.len() as u64).sum();
        let total_value = MOCK_VALUE_PER_CPT_CODE * Decimal::from(code_count);

        Self {
            total,
            processed,
            high_risk,
            success_rate,
            total_value,
        }
    }
}
