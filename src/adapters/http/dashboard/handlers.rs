//! HTTP handlers for dashboard endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use crate::application::handlers::dashboard::GetDashboardStatsQuery;

use super::super::response::{self, ApiError};
use super::super::state::AppState;

/// GET /api/dashboard/stats - group-wide rollups (admin).
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Response, ApiError> {
    let handler = state.dashboard_stats_handler();
    let stats = handler.handle(GetDashboardStatsQuery).await?;

    Ok(response::success(StatusCode::OK, stats))
}
