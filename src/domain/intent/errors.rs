//! Membership-intent specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / TokenNotFound | 404 |
//! | NotPending / NotApproved / TokenExpired / TokenAlreadyUsed / EmailMismatch | 400 |
//! | ActiveIntentExists / EmailRegistered / EmailInUse / CpfInUse | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, IntentId};

use super::IntentStatus;

/// Errors raised by the membership-intent lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// No intent with this id exists.
    NotFound(IntentId),

    /// No intent carries this invite token.
    TokenNotFound,

    /// The intent is not Pending, so it cannot be reviewed.
    NotPending { id: IntentId, current: IntentStatus },

    /// The intent was never approved, so its token grants nothing.
    NotApproved(IntentId),

    /// The invite token's validity window has passed.
    TokenExpired(IntentId),

    /// A member already redeemed this invite.
    TokenAlreadyUsed(IntentId),

    /// Registration email does not match the invited candidate.
    EmailMismatch,

    /// An active (pending or approved) intent already exists for this email.
    ActiveIntentExists(String),

    /// The email already belongs to a registered member.
    EmailRegistered(String),

    /// A login credential already exists for this email.
    EmailInUse(String),

    /// The CPF already belongs to another member.
    CpfInUse(String),

    /// A field failed validation.
    ValidationFailed { field: String, message: String },

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl IntentError {
    pub fn not_found(id: IntentId) -> Self {
        IntentError::NotFound(id)
    }

    pub fn not_pending(id: IntentId, current: IntentStatus) -> Self {
        IntentError::NotPending { id, current }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        IntentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        IntentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            IntentError::NotFound(_) => ErrorCode::IntentNotFound,
            IntentError::TokenNotFound => ErrorCode::TokenNotFound,
            IntentError::NotPending { .. } => ErrorCode::IntentNotPending,
            IntentError::NotApproved(_) => ErrorCode::IntentNotApproved,
            IntentError::TokenExpired(_) => ErrorCode::TokenExpired,
            IntentError::TokenAlreadyUsed(_) => ErrorCode::TokenAlreadyUsed,
            IntentError::EmailMismatch => ErrorCode::EmailMismatch,
            IntentError::ActiveIntentExists(_) => ErrorCode::ActiveIntentExists,
            IntentError::EmailRegistered(_) | IntentError::EmailInUse(_) => ErrorCode::EmailInUse,
            IntentError::CpfInUse(_) => ErrorCode::CpfInUse,
            IntentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            IntentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            IntentError::NotFound(id) => format!("Membership intent not found: {}", id),
            IntentError::TokenNotFound => "Invalid invite token".to_string(),
            IntentError::NotPending { current, .. } => format!(
                "Only pending intents can be reviewed (current status: {:?})",
                current
            ),
            IntentError::NotApproved(_) => "This intent has not been approved".to_string(),
            IntentError::TokenExpired(_) => "Invite token has expired".to_string(),
            IntentError::TokenAlreadyUsed(_) => "This invite has already been used".to_string(),
            IntentError::EmailMismatch => {
                "The provided email does not match the invited candidate".to_string()
            }
            IntentError::ActiveIntentExists(email) => {
                format!("An active membership intent already exists for {}", email)
            }
            IntentError::EmailRegistered(email) => {
                format!("{} is already registered as a member", email)
            }
            IntentError::EmailInUse(email) => format!("{} is already in use", email),
            IntentError::CpfInUse(_) => "This CPF is already registered".to_string(),
            IntentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            IntentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for IntentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for IntentError {}

impl From<DomainError> for IntentError {
    fn from(err: DomainError) -> Self {
        IntentError::Infrastructure(err.to_string())
    }
}

impl From<IntentError> for DomainError {
    fn from(err: IntentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
