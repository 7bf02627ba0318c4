//! API configuration

use serde::Deserialize;

/// API configuration
///
/// Built once at process start and handed to every component; there is no
/// dynamic reconfiguration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Base URL of the external extraction service
    pub ai_service_url: String,
    /// Extraction request timeout in seconds
    pub extraction_timeout_secs: u64,
    /// Directory uploaded files are stored in (served under /uploads)
    pub upload_dir: String,
    /// Per-file upload size limit in bytes
    pub max_upload_bytes: usize,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "postgres://localhost/claims_intake".to_string(),
            ai_service_url: "http://localhost:8000".to_string(),
            extraction_timeout_secs: infra_extraction::DEFAULT_TIMEOUT_SECS,
            upload_dir: "public/uploads".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
