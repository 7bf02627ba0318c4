//! Denial risk value type
//!
//! The extraction service estimates the probability that an insurance claim
//! will be denied. The estimate is only meaningful inside [0, 1], so the
//! newtype enforces the range at construction and at deserialization; an
//! out-of-range value from the wire is a schema violation, never silently
//! clamped.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Threshold above which a claim is counted as high risk on the dashboard
pub const HIGH_RISK_THRESHOLD: f64 = 0.3;

/// Threshold above which a claim counts against the approval-rate estimate
pub const LIKELY_DENIAL_THRESHOLD: f64 = 0.5;

/// Errors that can occur constructing a denial risk
#[derive(Debug, Error, PartialEq)]
pub enum RiskError {
    #[error("Denial risk must be within [0, 1], got {0}")]
    OutOfRange(f64),

    #[error("Denial risk must be a finite number")]
    NotFinite,
}

/// Probability of claim denial, constrained to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DenialRisk(f64);

impl DenialRisk {
    /// Creates a denial risk, rejecting non-finite or out-of-range values
    pub fn new(value: f64) -> Result<Self, RiskError> {
        if !value.is_finite() {
            return Err(RiskError::NotFinite);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(RiskError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw probability
    pub fn value(&self) -> f64 {
        self.0
    }

    /// True if the risk exceeds the dashboard's high-risk threshold
    pub fn is_high(&self) -> bool {
        self.0 > HIGH_RISK_THRESHOLD
    }

    /// True if the risk exceeds the likely-denial threshold
    pub fn is_likely_denial(&self) -> bool {
        self.0 > LIKELY_DENIAL_THRESHOLD
    }
}

impl TryFrom<f64> for DenialRisk {
    type Error = RiskError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DenialRisk> for f64 {
    fn from(risk: DenialRisk) -> f64 {
        risk.0
    }
}

impl fmt::Display for DenialRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds_accepted() {
        assert!(DenialRisk::new(0.0).is_ok());
        assert!(DenialRisk::new(1.0).is_ok());
        assert!(DenialRisk::new(0.42).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(DenialRisk::new(-0.01), Err(RiskError::OutOfRange(-0.01)));
        assert_eq!(DenialRisk::new(1.5), Err(RiskError::OutOfRange(1.5)));
        assert_eq!(DenialRisk::new(f64::NAN), Err(RiskError::NotFinite));
    }

    #[test]
    fn test_value_passes_through_unchanged() {
        let risk = DenialRisk::new(0.42).unwrap();
        assert_eq!(risk.value(), 0.42);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let result: Result<DenialRisk, _> = serde_json::from_str("2.0");
        assert!(result.is_err());
    }

    #[test]
    fn test_thresholds() {
        assert!(!DenialRisk::new(0.3).unwrap().is_high());
        assert!(DenialRisk::new(0.31).unwrap().is_high());
        assert!(!DenialRisk::new(0.5).unwrap().is_likely_denial());
        assert!(DenialRisk::new(0.51).unwrap().is_likely_denial());
    }

    proptest! {
        #[test]
        fn prop_valid_range_round_trips(value in 0.0f64..=1.0) {
            let risk = DenialRisk::new(value).unwrap();
            let json = serde_json::to_string(&risk).unwrap();
            let back: DenialRisk = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(risk, back);
            prop_assert_eq!(back.value(), value);
        }

        #[test]
        fn prop_out_of_range_rejected(value in prop_oneof![-1e6f64..-1e-9, 1.0 + 1e-9..1e6]) {
            prop_assert!(DenialRisk::new(value).is_err());
        }
    }
}
