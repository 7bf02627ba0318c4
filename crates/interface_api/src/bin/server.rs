//! Claims Intake - API Server Binary
//!
//! This binary starts the HTTP API server for the claims intake system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claims-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=5000 DATABASE_URL=postgres://... cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 5000)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_AI_SERVICE_URL` - Base URL of the document extraction service
//! * `API_EXTRACTION_TIMEOUT_SECS` - Extraction request timeout (default: 45)
//! * `API_UPLOAD_DIR` - Directory uploaded files are stored in (default: public/uploads)
//! * `API_MAX_UPLOAD_BYTES` - Per-file upload size limit (default: 10485760)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::ClaimsRepository;
use infra_extraction::{ExtractionClient, ExtractionClientConfig};
use infra_storage::DiskFileStore;
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes database connection,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - Database connection or migrations fail
/// - The upload directory cannot be created
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config()?;

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Claims Intake API Server"
    );

    // Create database connection pool and apply migrations
    let pool = infra_db::create_pool_from_url(&config.database_url).await?;
    infra_db::run_migrations(&pool).await?;

    // Wire the adapters behind the domain ports
    let claims = Arc::new(ClaimsRepository::new(pool));
    let files = Arc::new(DiskFileStore::create(&config.upload_dir).await?);
    let extractor = Arc::new(ExtractionClient::new(
        ExtractionClientConfig::new(&config.ai_service_url)
            .timeout(Duration::from_secs(config.extraction_timeout_secs)),
    )?);

    let state = AppState::new(claims, files, extractor, config.clone());
    let app = create_router(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual environment variables and defaults when the
/// prefixed configuration source is incomplete.
fn load_config() -> Result<ApiConfig, Box<dyn std::error::Error>> {
    let defaults = ApiConfig::default();

    // Try to load from environment with API_ prefix
    let config = ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("API_HOST").unwrap_or(defaults.host),
        port: std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        database_url: std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("API_DATABASE_URL"))
            .unwrap_or(defaults.database_url),
        ai_service_url: std::env::var("AI_SERVICE_URL")
            .or_else(|_| std::env::var("API_AI_SERVICE_URL"))
            .unwrap_or(defaults.ai_service_url),
        extraction_timeout_secs: std::env::var("API_EXTRACTION_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.extraction_timeout_secs),
        upload_dir: std::env::var("API_UPLOAD_DIR").unwrap_or(defaults.upload_dir),
        max_upload_bytes: std::env::var("API_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_upload_bytes),
        log_level: std::env::var("API_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(defaults.log_level),
    });

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
