//! HTTP handlers for member directory endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::application::handlers::member::{
    CreateMemberCommand, DeactivateMemberCommand, GetMemberQuery, ListMembersQuery,
    UpdateMemberCommand,
};
use crate::domain::foundation::MemberId;
use crate::domain::member::MemberError;

use super::super::response::{self, ApiError, PagedBody};
use super::super::state::AppState;
use super::dto::{
    CreateMemberRequest, ListMembersParams, MemberDetailResponse, MemberResponse,
    UpdateMemberRequest,
};

impl From<MemberError> for ApiError {
    fn from(err: MemberError) -> Self {
        ApiError::from_code(err.code(), err.message())
    }
}

/// POST /api/members - admin-initiated creation (invite-gated internally).
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> Result<Response, ApiError> {
    let (intent_id, profile) = request.into_parts();
    let handler = state.create_member_handler();
    let result = handler
        .handle(CreateMemberCommand { intent_id, profile })
        .await?;

    Ok(response::success_with_message(
        StatusCode::CREATED,
        MemberResponse::from(result.member),
        "Member created",
    ))
}

/// GET /api/members - directory listing with per-member counters.
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<ListMembersParams>,
) -> Result<Response, ApiError> {
    let (filter, page) = params.into_parts();
    let handler = state.member_query_handler();
    let result = handler.list(ListMembersQuery { filter, page }).await?;

    Ok(response::success(
        StatusCode::OK,
        PagedBody {
            items: result.items,
            pagination: result.meta,
        },
    ))
}

/// GET /api/members/:id - profile plus derived statistics.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<Response, ApiError> {
    let handler = state.member_query_handler();
    let detail = handler.get(GetMemberQuery { member_id: id }).await?;

    Ok(response::success(
        StatusCode::OK,
        MemberDetailResponse {
            member: MemberResponse::from(detail.member),
            statistics: detail.statistics,
        },
    ))
}

/// PATCH /api/members/:id - partial profile update.
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<Response, ApiError> {
    let handler = state.update_member_handler();
    let result = handler
        .handle(UpdateMemberCommand {
            member_id: id,
            patch: request.into(),
        })
        .await?;

    Ok(response::success(
        StatusCode::OK,
        MemberResponse::from(result.member),
    ))
}

/// DELETE /api/members/:id - soft deactivation.
pub async fn deactivate_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<Response, ApiError> {
    let handler = state.deactivate_member_handler();
    let result = handler
        .handle(DeactivateMemberCommand { member_id: id })
        .await?;

    Ok(response::success_with_message(
        StatusCode::OK,
        MemberResponse::from(result.member),
        "Member deactivated",
    ))
}
