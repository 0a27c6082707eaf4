//! Axum router for membership intent endpoints.

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;

use super::super::middleware::require_api_key;
use super::super::state::AppState;
use super::handlers::{
    approve_intent, complete_registration, get_intent, list_intents, reject_intent,
    submit_intent, validate_token,
};

/// Creates the membership intent router.
///
/// # Routes
///
/// ## Public
/// - `POST /` - Submit an intent
/// - `GET /validate-token/:token` - Validate an invite token
/// - `POST /complete-registration` - Redeem an invite token
///
/// ## Admin (API key)
/// - `GET /` - List intents
/// - `GET /:id` - Intent detail
/// - `PATCH /:id/approve` - Approve
/// - `PATCH /:id/reject` - Reject
pub fn intent_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", post(submit_intent))
        .route("/validate-token/:token", get(validate_token))
        .route("/complete-registration", post(complete_registration));

    let admin = Router::new()
        .route("/", get(list_intents))
        .route("/:id", get(get_intent))
        .route("/:id/approve", patch(approve_intent))
        .route("/:id/reject", patch(reject_intent))
        .route_layer(middleware::from_fn_with_state(state, require_api_key));

    public.merge(admin)
}
