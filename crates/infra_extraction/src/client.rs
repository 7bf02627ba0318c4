//! Extraction service HTTP client

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, instrument};

use domain_claims::{ClaimError, DocumentExtractor, DocumentUpload, ExtractionResult};

use crate::wire;

/// Default request timeout in seconds
///
/// The source system had no client-side timeout at all; extraction of two
/// documents through OCR plus an LLM routinely takes tens of seconds, so the
/// default sits in the middle of the 30-60s band. Expiry is classified as a
/// network failure and is safe to retry.
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;

/// Configuration for the extraction service client
#[derive(Debug, Clone)]
pub struct ExtractionClientConfig {
    /// Base URL of the service, e.g. "http://localhost:8000"
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl ExtractionClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the external document-extraction service
///
/// A pure proxy over `POST {base_url}/api/process-documents`: both files go
/// out as one multipart request, the JSON response is schema-validated in
/// [`wire`] and converted to the domain result. No retries.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    config: ExtractionClientConfig,
    client: reqwest::Client,
}

impl ExtractionClient {
    /// Builds the client with its connection pool and timeout
    pub fn new(config: ExtractionClientConfig) -> Result<Self, ClaimError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ClaimError::extraction_network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/process-documents",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl DocumentExtractor for ExtractionClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint()))]
    async fn extract(
        &self,
        insurance_card: &DocumentUpload,
        clinical_doc: &DocumentUpload,
    ) -> Result<ExtractionResult, ClaimError> {
        let form = Form::new()
            .part("insurance_card", file_part(insurance_card)?)
            .part("clinical_doc", file_part(clinical_doc)?);

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(send_error)?;

        let status = response.status();
        debug!(%status, "extraction service responded");

        let body = response.bytes().await.map_err(send_error)?;

        // The service signals its own failures as JSON with success: false,
        // so the body is parsed regardless of status; only an unparseable
        // body makes this a network-level failure.
        let parsed: wire::ExtractionResponse = serde_json::from_slice(&body).map_err(|_| {
            ClaimError::extraction_network(format!(
                "extraction service returned {status} with an unparseable body"
            ))
        })?;

        wire::into_result(parsed)
    }
}

fn file_part(upload: &DocumentUpload) -> Result<Part, ClaimError> {
    Part::bytes(upload.bytes.clone())
        .file_name(upload.original_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|e| {
            ClaimError::validation(format!(
                "invalid content type '{}': {e}",
                upload.content_type
            ))
        })
}

fn send_error(error: reqwest::Error) -> ClaimError {
    if error.is_timeout() {
        ClaimError::extraction_network("extraction request timed out")
    } else {
        ClaimError::extraction_network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client =
            ExtractionClient::new(ExtractionClientConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8000/api/process-documents"
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = ExtractionClientConfig::new("http://ai.internal");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_failure() {
        // Port 1 on localhost refuses connections immediately
        let client = ExtractionClient::new(
            ExtractionClientConfig::new("http://127.0.0.1:1")
                .timeout(Duration::from_millis(500)),
        )
        .unwrap();

        let card = DocumentUpload::new("insuranceCard", "card.png", "image/png", vec![1]);
        let doc = DocumentUpload::new("clinicalDoc", "doc.pdf", "application/pdf", vec![2]);

        let err = client.extract(&card, &doc).await.unwrap_err();
        assert!(matches!(err, ClaimError::ExtractionNetwork(_)));
        assert!(err.is_transient());
    }
}
