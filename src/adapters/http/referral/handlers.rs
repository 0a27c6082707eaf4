//! HTTP handlers for referral endpoints.
//!
//! All endpoints act on behalf of the authenticated member.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::application::handlers::referral::{
    CreateReferralCommand, GetReferralQuery, ListReferralsQuery, UpdateReferralStatusCommand,
};
use crate::domain::foundation::ReferralId;
use crate::domain::referral::ReferralError;

use super::super::middleware::AuthenticatedMember;
use super::super::response::{self, ApiError, PagedBody};
use super::super::state::AppState;
use super::dto::{
    CreateReferralRequest, ListReferralsParams, ReferralDetailResponse, ReferralListResponse,
    ReferralResponse, StatusChangeResponse, UpdateReferralStatusRequest,
};

impl From<ReferralError> for ApiError {
    fn from(err: ReferralError) -> Self {
        ApiError::from_code(err.code(), err.message())
    }
}

/// POST /api/referrals - pass a lead to another member.
pub async fn create_referral(
    State(state): State<AppState>,
    member: AuthenticatedMember,
    Json(request): Json<CreateReferralRequest>,
) -> Result<Response, ApiError> {
    let (referred_to_id, details) = request.into_parts();
    let handler = state.create_referral_handler();
    let result = handler
        .handle(CreateReferralCommand {
            referrer_id: member.member_id,
            referred_to_id,
            details,
        })
        .await?;

    Ok(response::success_with_message(
        StatusCode::CREATED,
        ReferralResponse::from(result.referral),
        "Referral created",
    ))
}

/// GET /api/referrals - the member's referrals plus statistics.
pub async fn list_referrals(
    State(state): State<AppState>,
    member: AuthenticatedMember,
    Query(params): Query<ListReferralsParams>,
) -> Result<Response, ApiError> {
    let (filter, page) = params.into_parts();
    let handler = state.referral_query_handler();
    let listing = handler
        .list(ListReferralsQuery {
            member_id: member.member_id,
            filter,
            page,
        })
        .await?;

    let page = listing.page.map(ReferralResponse::from);
    Ok(response::success(
        StatusCode::OK,
        ReferralListResponse {
            page: PagedBody {
                items: page.items,
                pagination: page.meta,
            },
            statistics: listing.statistics,
        },
    ))
}

/// GET /api/referrals/:id - referral detail with history.
pub async fn get_referral(
    State(state): State<AppState>,
    member: AuthenticatedMember,
    Path(id): Path<ReferralId>,
) -> Result<Response, ApiError> {
    let handler = state.referral_query_handler();
    let detail = handler
        .get(GetReferralQuery {
            member_id: member.member_id,
            referral_id: id,
        })
        .await?;

    Ok(response::success(
        StatusCode::OK,
        ReferralDetailResponse {
            referral: ReferralResponse::from(detail.referral),
            status_history: detail
                .history
                .into_iter()
                .map(StatusChangeResponse::from)
                .collect(),
        },
    ))
}

/// PATCH /api/referrals/:id/status - recipient-driven transition.
pub async fn update_referral_status(
    State(state): State<AppState>,
    member: AuthenticatedMember,
    Path(id): Path<ReferralId>,
    Json(request): Json<UpdateReferralStatusRequest>,
) -> Result<Response, ApiError> {
    let handler = state.update_referral_status_handler();
    let result = handler
        .handle(UpdateReferralStatusCommand {
            member_id: member.member_id,
            referral_id: id,
            status: request.status,
            feedback: request.feedback,
            closed_value: request.closed_value,
        })
        .await?;

    Ok(response::success_with_message(
        StatusCode::OK,
        ReferralResponse::from(result.referral),
        "Referral status updated",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_support::test_state;
    use crate::domain::foundation::{IntentId, MemberId, UserId};
    use crate::domain::member::{Member, MemberProfile};
    use crate::domain::referral::ReferralStatus;

    fn member(email: &str) -> Member {
        Member::register(
            MemberId::new(),
            UserId::new(),
            IntentId::new(),
            MemberProfile {
                full_name: email.to_string(),
                email: email.to_string(),
                ..Default::default()
            },
        )
    }

    fn create_request(recipient: MemberId) -> CreateReferralRequest {
        CreateReferralRequest {
            referred_to_id: recipient,
            client_name: "Cliente".to_string(),
            client_phone: None,
            client_email: None,
            description: "lead".to_string(),
            estimated_value: Some(5_000_00),
        }
    }

    #[tokio::test]
    async fn create_and_update_referral_roundtrip() {
        let app = test_state();
        let referrer = member("ref@x.com");
        let recipient = member("rec@x.com");
        app.store.insert_member(referrer.clone());
        app.store.insert_member(recipient.clone());

        let result = create_referral(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Json(create_request(recipient.id)),
        )
        .await
        .unwrap();
        assert_eq!(result.status(), StatusCode::CREATED);

        let referral_id = app.referrals.all()[0].id;

        let result = update_referral_status(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: recipient.id,
            },
            Path(referral_id),
            Json(UpdateReferralStatusRequest {
                status: ReferralStatus::Closed,
                feedback: None,
                closed_value: Some(7_000_00),
            }),
        )
        .await
        .unwrap();
        assert_eq!(result.status(), StatusCode::OK);
        assert_eq!(app.referrals.all()[0].status, ReferralStatus::Closed);
    }

    #[tokio::test]
    async fn self_referral_maps_to_400() {
        let app = test_state();
        let me = member("me@x.com");
        app.store.insert_member(me.clone());

        let err = create_referral(
            State(app.state.clone()),
            AuthenticatedMember { member_id: me.id },
            Json(create_request(me.id)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "SELF_REFERRAL");
    }

    #[tokio::test]
    async fn referrer_updating_status_maps_to_403() {
        let app = test_state();
        let referrer = member("ref@x.com");
        let recipient = member("rec@x.com");
        app.store.insert_member(referrer.clone());
        app.store.insert_member(recipient.clone());

        create_referral(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Json(create_request(recipient.id)),
        )
        .await
        .unwrap();
        let referral_id = app.referrals.all()[0].id;

        let err = update_referral_status(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Path(referral_id),
            Json(UpdateReferralStatusRequest {
                status: ReferralStatus::Contacted,
                feedback: None,
                closed_value: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, "RECIPIENT_ONLY");
    }

    #[tokio::test]
    async fn closing_without_value_maps_to_400() {
        let app = test_state();
        let referrer = member("ref@x.com");
        let recipient = member("rec@x.com");
        app.store.insert_member(referrer.clone());
        app.store.insert_member(recipient.clone());

        create_referral(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Json(create_request(recipient.id)),
        )
        .await
        .unwrap();
        let referral_id = app.referrals.all()[0].id;

        let err = update_referral_status(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: recipient.id,
            },
            Path(referral_id),
            Json(UpdateReferralStatusRequest {
                status: ReferralStatus::Closed,
                feedback: None,
                closed_value: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_CLOSED_VALUE");
    }

    #[tokio::test]
    async fn outsider_viewing_referral_maps_to_403() {
        let app = test_state();
        let referrer = member("ref@x.com");
        let recipient = member("rec@x.com");
        app.store.insert_member(referrer.clone());
        app.store.insert_member(recipient.clone());

        create_referral(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Json(create_request(recipient.id)),
        )
        .await
        .unwrap();
        let referral_id = app.referrals.all()[0].id;

        let err = get_referral(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: MemberId::new(),
            },
            Path(referral_id),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn list_referrals_includes_statistics() {
        let app = test_state();
        let referrer = member("ref@x.com");
        let recipient = member("rec@x.com");
        app.store.insert_member(referrer.clone());
        app.store.insert_member(recipient.clone());

        create_referral(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Json(create_request(recipient.id)),
        )
        .await
        .unwrap();

        let result = list_referrals(
            State(app.state.clone()),
            AuthenticatedMember {
                member_id: referrer.id,
            },
            Query(serde_json::from_str("{}").unwrap()),
        )
        .await
        .unwrap();
        assert_eq!(result.status(), StatusCode::OK);
    }
}
