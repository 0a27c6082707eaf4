//! Axum router for referral endpoints.
//!
//! Every route requires member authentication through the
//! `AuthenticatedMember` extractor in the handlers.

use axum::routing::{get, patch, post};
use axum::Router;

use super::super::state::AppState;
use super::handlers::{create_referral, get_referral, list_referrals, update_referral_status};

/// Creates the referral router.
///
/// # Routes (member auth)
/// - `POST /` - Create a referral
/// - `GET /` - List the member's referrals plus statistics
/// - `GET /:id` - Referral detail with history
/// - `PATCH /:id/status` - Update status (recipient only)
pub fn referral_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_referral))
        .route("/", get(list_referrals))
        .route("/:id", get(get_referral))
        .route("/:id/status", patch(update_referral_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::test_state;

    #[test]
    fn referral_routes_build_without_panic() {
        let app = test_state();
        let router = referral_routes();
        let _: Router<()> = router.with_state(app.state);
    }
}
