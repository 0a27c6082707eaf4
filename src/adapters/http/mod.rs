//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (dto/handlers/routes); the
//! route policy lives here, in `api_router`, as explicit per-router
//! middleware rather than per-handler annotations.

pub mod dashboard;
pub mod intent;
pub mod member;
pub mod middleware;
pub mod referral;
pub mod response;
pub mod state;

pub use response::ApiError;
pub use state::AppState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the complete API router.
///
/// ```text
/// /api/membership-intents/...   public + admin
/// /api/members/...              public create + admin CRUD
/// /api/referrals/...            member auth
/// /api/dashboard/...            admin
/// ```
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/membership-intents", intent::intent_routes(state.clone()))
        .nest("/members", member::member_routes(state.clone()))
        .nest("/referrals", referral::referral_routes())
        .nest("/dashboard", dashboard::dashboard_routes(state.clone()));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
