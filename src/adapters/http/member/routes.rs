//! Axum router for member directory endpoints.

use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use super::super::middleware::require_api_key;
use super::super::state::AppState;
use super::handlers::{
    create_member, deactivate_member, get_member, list_members, update_member,
};

/// Creates the member directory router.
///
/// # Routes
///
/// ## Public (invite-gated internally)
/// - `POST /` - Create a member from an approved intent
///
/// ## Admin (API key)
/// - `GET /` - Directory listing
/// - `GET /:id` - Profile plus statistics
/// - `PATCH /:id` - Partial update
/// - `DELETE /:id` - Soft deactivation
pub fn member_routes(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/", post(create_member));

    let admin = Router::new()
        .route("/", get(list_members))
        .route("/:id", get(get_member))
        .route("/:id", patch(update_member))
        .route("/:id", delete(deactivate_member))
        .route_layer(middleware::from_fn_with_state(state, require_api_key));

    public.merge(admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::test_state;

    #[test]
    fn member_routes_build_without_panic() {
        let app = test_state();
        let router = member_routes(app.state.clone());
        let _: Router<()> = router.with_state(app.state);
    }
}
