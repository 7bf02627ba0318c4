//! HTTP API Layer
//!
//! This crate provides the REST API for the claims intake system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claims CRUD, dashboard stats, health
//! - **Upload**: the multipart upload receiver feeding the ingestion workflow
//! - **DTOs**: response envelopes
//! - **Error Handling**: consistent structured error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let state = AppState::new(claims, files, extractor, config);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use domain_claims::{ClaimStore, DocumentExtractor, FileStore, IngestionWorkflow};

use crate::config::ApiConfig;
use crate::handlers::{claims, health, stats};

/// Application state shared across handlers
///
/// Holds the three ports behind trait objects so tests can substitute
/// in-memory fakes, plus the workflow wired over them.
#[derive(Clone)]
pub struct AppState {
    pub claims: Arc<dyn ClaimStore>,
    pub files: Arc<dyn FileStore>,
    pub workflow: Arc<IngestionWorkflow>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the application state from the concrete adapters
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        files: Arc<dyn FileStore>,
        extractor: Arc<dyn DocumentExtractor>,
        config: ApiConfig,
    ) -> Self {
        let workflow = Arc::new(IngestionWorkflow::new(
            files.clone(),
            extractor,
            claims.clone(),
        ));
        Self {
            claims,
            files,
            workflow,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Two files per request plus multipart framing overhead
    let body_limit = state.config.max_upload_bytes * 2 + 1024 * 1024;

    let claims_routes = Router::new()
        .route("/", post(claims::create_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id", delete(claims::delete_claim));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .route("/stats", get(stats::dashboard_stats))
        .route("/health", get(health::health_check));

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
