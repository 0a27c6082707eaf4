//! HTTP handlers for membership intent endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::application::handlers::intent::{
    ApproveIntentCommand, CompleteRegistrationCommand, GetIntentQuery, ListIntentsQuery,
    RejectIntentCommand, SubmitIntentCommand, ValidateTokenQuery,
};
use crate::domain::foundation::IntentId;
use crate::domain::intent::IntentError;

use super::super::middleware::AdminReviewer;
use super::super::response::{self, ApiError, PagedBody};
use super::super::state::AppState;
use super::dto::{
    ApproveIntentRequest, CompleteRegistrationRequest, CreateIntentRequest, IntentResponse,
    ListIntentsParams, RegistrationResponse, RejectIntentRequest, ValidateTokenResponse,
};

impl From<IntentError> for ApiError {
    fn from(err: IntentError) -> Self {
        ApiError::from_code(err.code(), err.message())
    }
}

/// POST /api/membership-intents - public submission.
pub async fn submit_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Response, ApiError> {
    let handler = state.submit_intent_handler();
    let result = handler
        .handle(SubmitIntentCommand {
            submission: request.into(),
        })
        .await?;

    Ok(response::success_with_message(
        StatusCode::CREATED,
        IntentResponse::from(result.intent),
        "Membership intent received",
    ))
}

/// GET /api/membership-intents - admin listing.
pub async fn list_intents(
    State(state): State<AppState>,
    Query(params): Query<ListIntentsParams>,
) -> Result<Response, ApiError> {
    let (filter, page) = params.into_parts();
    let handler = state.intent_query_handler();
    let result = handler.list(ListIntentsQuery { filter, page }).await?;

    let page = result.map(IntentResponse::from);
    Ok(response::success(
        StatusCode::OK,
        PagedBody {
            items: page.items,
            pagination: page.meta,
        },
    ))
}

/// GET /api/membership-intents/:id - admin detail view.
pub async fn get_intent(
    State(state): State<AppState>,
    Path(id): Path<IntentId>,
) -> Result<Response, ApiError> {
    let handler = state.intent_query_handler();
    let intent = handler.get(GetIntentQuery { intent_id: id }).await?;

    Ok(response::success(StatusCode::OK, IntentResponse::from(intent)))
}

/// PATCH /api/membership-intents/:id/approve - admin approval.
pub async fn approve_intent(
    State(state): State<AppState>,
    Path(id): Path<IntentId>,
    admin: AdminReviewer,
    Json(request): Json<ApproveIntentRequest>,
) -> Result<Response, ApiError> {
    let handler = state.review_intent_handler();
    let result = handler
        .approve(ApproveIntentCommand {
            intent_id: id,
            reviewer: admin.reviewer,
            notes: request.notes,
        })
        .await?;

    Ok(response::success_with_message(
        StatusCode::OK,
        IntentResponse::from(result.intent),
        "Membership intent approved",
    ))
}

/// PATCH /api/membership-intents/:id/reject - admin rejection.
pub async fn reject_intent(
    State(state): State<AppState>,
    Path(id): Path<IntentId>,
    admin: AdminReviewer,
    Json(request): Json<RejectIntentRequest>,
) -> Result<Response, ApiError> {
    let handler = state.review_intent_handler();
    let result = handler
        .reject(RejectIntentCommand {
            intent_id: id,
            reviewer: admin.reviewer,
            reason: request.reason,
        })
        .await?;

    Ok(response::success_with_message(
        StatusCode::OK,
        IntentResponse::from(result.intent),
        "Membership intent rejected",
    ))
}

/// GET /api/membership-intents/validate-token/:token - public validation.
pub async fn validate_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let handler = state.validate_token_handler();
    let intent = handler.handle(ValidateTokenQuery { token }).await?;

    Ok(response::success(
        StatusCode::OK,
        ValidateTokenResponse::from(intent),
    ))
}

/// POST /api/membership-intents/complete-registration - public redemption.
pub async fn complete_registration(
    State(state): State<AppState>,
    Json(request): Json<CompleteRegistrationRequest>,
) -> Result<Response, ApiError> {
    let (invite_token, password, profile) = request.into_profile();
    let handler = state.complete_registration_handler();
    let result = handler
        .handle(CompleteRegistrationCommand {
            invite_token,
            password,
            profile,
        })
        .await?;

    Ok(response::success_with_message(
        StatusCode::CREATED,
        RegistrationResponse {
            user_id: result.user_id.to_string(),
            member_id: result.member.id.to_string(),
        },
        "Registration completed",
    ))
}
