//! Dashboard statistics

use axum::{extract::State, Json};

use domain_claims::{ClaimStore, DashboardStats};

use crate::error::ApiError;
use crate::AppState;

/// Aggregates the current claim set into dashboard figures
pub async fn dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let claims = state.claims.list_newest_first().await?;
    Ok(Json(DashboardStats::compute(&claims)))
}
