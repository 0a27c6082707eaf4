//! Response envelope shared by every endpoint.
//!
//! Success payloads are wrapped as
//! `{"success": true, "data": ..., "message"?, "meta": {"timestamp"}}`;
//! errors as
//! `{"success": false, "error": {"code", "message", "details"?}, "meta"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode, PageMeta};

/// Envelope metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMeta {
    pub timestamp: String,
}

impl ResponseMeta {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SuccessBody<T: Serialize> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    meta: ResponseMeta,
}

/// Wraps a payload in the success envelope.
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    (
        status,
        Json(SuccessBody {
            success: true,
            data,
            message: None,
            meta: ResponseMeta::now(),
        }),
    )
        .into_response()
}

/// Wraps a payload in the success envelope with a human-readable message.
pub fn success_with_message<T: Serialize>(
    status: StatusCode,
    data: T,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(SuccessBody {
            success: true,
            data,
            message: Some(message.into()),
            meta: ResponseMeta::now(),
        }),
    )
        .into_response()
}

/// List payload: items plus pagination metadata.
#[derive(Debug, Serialize)]
pub struct PagedBody<T: Serialize> {
    pub items: Vec<T>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
struct ErrorInfo {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: ErrorInfo,
    meta: ResponseMeta,
}

/// API error carrying the HTTP status plus the stable wire code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Builds an API error from a domain error code plus message.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(status_for(code), code.to_string(), message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized.to_string(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                success: false,
                error: ErrorInfo {
                    code: self.code,
                    message: self.message,
                    details: self.details,
                },
                meta: ResponseMeta::now(),
            }),
        )
            .into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::from_code(err.code, err.message)
    }
}

/// Maps every domain error code onto its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    use ErrorCode::*;
    match code {
        IntentNotFound | MemberNotFound | ReferralNotFound | UserNotFound | TokenNotFound => {
            StatusCode::NOT_FOUND
        }
        ActiveIntentExists | EmailInUse | CpfInUse => StatusCode::CONFLICT,
        ReferrerNotEligible | NotReferralParticipant | RecipientOnly | Forbidden => {
            StatusCode::FORBIDDEN
        }
        Unauthorized => StatusCode::UNAUTHORIZED,
        DatabaseError | InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        // State-machine preconditions, expired/used tokens, validation
        _ => StatusCode::BAD_REQUEST,
    }
}
