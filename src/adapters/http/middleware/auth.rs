//! Authentication middleware and extractors for axum.
//!
//! Two schemes, matching the route policy table in `http::api_router`:
//!
//! - **Admin endpoints** require the static API key in `X-Api-Key`,
//!   enforced by the [`require_api_key`] layer. Review endpoints
//!   additionally identify the acting admin via the [`AdminReviewer`]
//!   extractor (`X-Admin-Id`).
//! - **Member endpoints** identify the acting member via the
//!   [`AuthenticatedMember`] extractor. For now this reads an
//!   `X-Member-Id` header; swapping in real session validation only
//!   changes this extractor, not the handlers.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::foundation::{MemberId, UserId};

use super::super::response::ApiError;
use super::super::state::AppState;

/// Middleware enforcing the static admin API key.
///
/// Rejects with 401 when the `X-Api-Key` header is missing or does not
/// match the configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get("X-Api-Key")
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if key == state.admin_api_key.as_ref() => next.run(request).await,
        _ => ApiError::unauthorized("Invalid API key").into_response(),
    }
}

/// The member a request acts on behalf of.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedMember {
    pub member_id: MemberId,
}

/// Rejection for missing/invalid member identity.
pub struct MemberAuthRequired;

impl IntoResponse for MemberAuthRequired {
    fn into_response(self) -> Response {
        ApiError::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Member authentication is required",
        )
        .into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedMember
where
    S: Send + Sync,
{
    type Rejection = MemberAuthRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let member_id = parts
                .headers
                .get("X-Member-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<MemberId>().ok())
                .ok_or(MemberAuthRequired)?;

            Ok(AuthenticatedMember { member_id })
        })
    }
}

/// The admin performing a review decision.
#[derive(Debug, Clone, Copy)]
pub struct AdminReviewer {
    pub reviewer: UserId,
}

/// Rejection for missing/invalid admin identity.
pub struct AdminIdentityRequired;

impl IntoResponse for AdminIdentityRequired {
    fn into_response(self) -> Response {
        ApiError::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Admin identity is required",
        )
        .into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AdminReviewer
where
    S: Send + Sync,
{
    type Rejection = AdminIdentityRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let reviewer = parts
                .headers
                .get("X-Admin-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<UserId>().ok())
                .ok_or(AdminIdentityRequired)?;

            Ok(AdminReviewer { reviewer })
        })
    }
}
