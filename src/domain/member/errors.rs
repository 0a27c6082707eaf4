//! Member directory error types.
//!
//! The admin-initiated creation variant shares the invite-token
//! preconditions with registration completion, so the intent-related
//! variants appear here as well with their own codes.

use crate::domain::foundation::{DomainError, ErrorCode, IntentId, MemberId};

/// Errors raised by member directory operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberError {
    /// No member with this id exists.
    NotFound(MemberId),

    /// The referenced membership intent does not exist.
    IntentNotFound(IntentId),

    /// The referenced intent was never approved.
    IntentNotApproved(IntentId),

    /// The intent's invite token has expired.
    InviteExpired(IntentId),

    /// A member was already created from this intent.
    InviteAlreadyUsed(IntentId),

    /// The email already belongs to a member or credential.
    EmailInUse(String),

    /// The CPF already belongs to another member.
    CpfInUse(String),

    /// A field failed validation.
    ValidationFailed { field: String, message: String },

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl MemberError {
    pub fn not_found(id: MemberId) -> Self {
        MemberError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MemberError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MemberError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MemberError::NotFound(_) => ErrorCode::MemberNotFound,
            MemberError::IntentNotFound(_) => ErrorCode::IntentNotFound,
            MemberError::IntentNotApproved(_) => ErrorCode::IntentNotApproved,
            MemberError::InviteExpired(_) => ErrorCode::TokenExpired,
            MemberError::InviteAlreadyUsed(_) => ErrorCode::TokenAlreadyUsed,
            MemberError::EmailInUse(_) => ErrorCode::EmailInUse,
            MemberError::CpfInUse(_) => ErrorCode::CpfInUse,
            MemberError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MemberError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            MemberError::NotFound(id) => format!("Member not found: {}", id),
            MemberError::IntentNotFound(id) => format!("Membership intent not found: {}", id),
            MemberError::IntentNotApproved(_) => "This intent has not been approved".to_string(),
            MemberError::InviteExpired(_) => "Invite token has expired".to_string(),
            MemberError::InviteAlreadyUsed(_) => "This invite has already been used".to_string(),
            MemberError::EmailInUse(email) => format!("{} is already registered", email),
            MemberError::CpfInUse(_) => "This CPF is already registered".to_string(),
            MemberError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MemberError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MemberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MemberError {}

impl From<DomainError> for MemberError {
    fn from(err: DomainError) -> Self {
        MemberError::Infrastructure(err.to_string())
    }
}

impl From<MemberError> for DomainError {
    fn from(err: MemberError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
