//! Wire format of the extraction service
//!
//! The service responds with loosely-typed JSON. These types mirror that
//! shape exactly (snake_case, everything optional); `into_result` is the
//! single place where the wire shape is validated and converted into the
//! domain's `ExtractionResult` with its camelCase claim fields.

use chrono::NaiveDate;
use serde::Deserialize;

use domain_claims::{ClaimError, ExtractionResult};

/// Top-level extraction service response
#[derive(Debug, Deserialize)]
pub struct ExtractionResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<ExtractionData>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The `data` payload of a successful response
#[derive(Debug, Deserialize)]
pub struct ExtractionData {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub insurance_company: Option<String>,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub group_number: Option<String>,
    #[serde(default)]
    pub proposed_cpt_codes: Option<Vec<String>>,
    #[serde(default)]
    pub proposed_icd_codes: Option<Vec<String>>,
    #[serde(default)]
    pub estimated_denial_risk: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Validates a parsed response and converts it into the domain result
///
/// Any mismatch with the declared schema - `success: false`, missing data
/// payload, missing required fields, malformed date, risk outside [0, 1] -
/// is an application-level extraction failure. Undefined fields never
/// propagate past this point.
pub fn into_result(response: ExtractionResponse) -> Result<ExtractionResult, ClaimError> {
    if !response.success {
        return Err(ClaimError::extraction_application(
            response
                .error
                .unwrap_or_else(|| "extraction service reported failure".to_string()),
        ));
    }

    let data = response.data.ok_or_else(|| {
        ClaimError::extraction_application(
            "extraction service reported success without a data payload",
        )
    })?;

    let date_of_birth = data
        .date_of_birth
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                ClaimError::extraction_application(format!(
                    "Extraction response failed schema validation: bad date_of_birth '{s}'"
                ))
            })
        })
        .transpose()?;

    ExtractionResult::try_new(
        data.patient_name,
        date_of_birth,
        data.insurance_company,
        data.policy_number,
        data.group_number,
        data.proposed_cpt_codes.unwrap_or_default(),
        data.proposed_icd_codes.unwrap_or_default(),
        data.estimated_denial_risk,
        response.raw_text,
        data.confidence,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ExtractionResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_successful_response_converts() {
        let response = parse(
            r#"{
                "success": true,
                "data": {
                    "patient_name": "Jane Doe",
                    "date_of_birth": "1985-03-14",
                    "insurance_company": "Acme Health",
                    "policy_number": "PN-1",
                    "group_number": null,
                    "proposed_cpt_codes": ["99213"],
                    "proposed_icd_codes": ["I10", "E11.9"],
                    "estimated_denial_risk": 0.12
                },
                "raw_text": "INSURANCE CARD TEXT..."
            }"#,
        );

        let result = into_result(response).unwrap();
        assert_eq!(result.fields.patient_name, "Jane Doe");
        assert_eq!(
            result.fields.date_of_birth,
            NaiveDate::from_ymd_opt(1985, 3, 14)
        );
        assert_eq!(result.fields.proposed_icd_codes.len(), 2);
        assert_eq!(result.fields.estimated_denial_risk.unwrap().value(), 0.12);
        assert!(result.raw_text.is_some());
    }

    #[test]
    fn test_success_false_is_application_failure() {
        let response = parse(r#"{"success": false, "error": "no text found"}"#);
        let err = into_result(response).unwrap_err();
        assert!(matches!(err, ClaimError::ExtractionApplication(_)));
        assert!(err.to_string().contains("no text found"));
    }

    #[test]
    fn test_success_without_data_is_application_failure() {
        let response = parse(r#"{"success": true}"#);
        assert!(matches!(
            into_result(response),
            Err(ClaimError::ExtractionApplication(_))
        ));
    }

    #[test]
    fn test_missing_required_field_is_application_failure() {
        let response = parse(
            r#"{"success": true, "data": {"insurance_company": "Acme Health"}}"#,
        );
        assert!(matches!(
            into_result(response),
            Err(ClaimError::ExtractionApplication(_))
        ));
    }

    #[test]
    fn test_malformed_date_is_application_failure() {
        let response = parse(
            r#"{"success": true, "data": {
                "patient_name": "Jane Doe",
                "insurance_company": "Acme Health",
                "date_of_birth": "14/03/1985"
            }}"#,
        );
        assert!(matches!(
            into_result(response),
            Err(ClaimError::ExtractionApplication(_))
        ));
    }

    #[test]
    fn test_out_of_range_risk_is_application_failure() {
        let response = parse(
            r#"{"success": true, "data": {
                "patient_name": "Jane Doe",
                "insurance_company": "Acme Health",
                "estimated_denial_risk": 1.7
            }}"#,
        );
        assert!(matches!(
            into_result(response),
            Err(ClaimError::ExtractionApplication(_))
        ));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let response = parse(
            r#"{"success": true, "data": {
                "patient_name": "Jane Doe",
                "insurance_company": "Acme Health",
                "unexpected": {"nested": true}
            }, "model_version": "gpt-4"}"#,
        );
        assert!(into_result(response).is_ok());
    }
}
