//! Axum router for dashboard endpoints.

use axum::middleware;
use axum::routing::get;
use axum::Router;

use super::super::middleware::require_api_key;
use super::super::state::AppState;
use super::handlers::get_dashboard_stats;

/// Creates the dashboard router.
///
/// # Routes (API key)
/// - `GET /stats` - Group-wide statistics
pub fn dashboard_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_dashboard_stats))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::test_state;

    #[test]
    fn dashboard_routes_build_without_panic() {
        let app = test_state();
        let router = dashboard_routes(app.state.clone());
        let _: Router<()> = router.with_state(app.state);
    }
}
