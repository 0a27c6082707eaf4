//! Referral lifecycle error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | SelfReferral / RecipientUnavailable / MissingClosedValue / ValidationFailed | 400 |
//! | ReferrerNotEligible / NotParticipant / RecipientOnly | 403 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, MemberId, ReferralId};

/// Errors raised by the referral lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferralError {
    /// No referral with this id exists.
    NotFound(ReferralId),

    /// Referrer and recipient are the same member.
    SelfReferral,

    /// The acting member is missing or not Active, so it cannot refer.
    ReferrerNotEligible(MemberId),

    /// The recipient is missing or not Active.
    RecipientUnavailable(MemberId),

    /// The acting member is neither referrer nor recipient.
    NotParticipant { referral: ReferralId, member: MemberId },

    /// Only the recipient may change a referral's status.
    RecipientOnly(ReferralId),

    /// Closing a referral requires a closed value.
    MissingClosedValue(ReferralId),

    /// A field failed validation.
    ValidationFailed { field: String, message: String },

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl ReferralError {
    pub fn not_found(id: ReferralId) -> Self {
        ReferralError::NotFound(id)
    }

    pub fn not_participant(referral: ReferralId, member: MemberId) -> Self {
        ReferralError::NotParticipant { referral, member }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReferralError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReferralError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ReferralError::NotFound(_) => ErrorCode::ReferralNotFound,
            ReferralError::SelfReferral => ErrorCode::SelfReferral,
            ReferralError::ReferrerNotEligible(_) => ErrorCode::ReferrerNotEligible,
            ReferralError::RecipientUnavailable(_) => ErrorCode::RecipientUnavailable,
            ReferralError::NotParticipant { .. } => ErrorCode::NotReferralParticipant,
            ReferralError::RecipientOnly(_) => ErrorCode::RecipientOnly,
            ReferralError::MissingClosedValue(_) => ErrorCode::MissingClosedValue,
            ReferralError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReferralError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            ReferralError::NotFound(id) => format!("Referral not found: {}", id),
            ReferralError::SelfReferral => "You cannot create a referral to yourself".to_string(),
            ReferralError::ReferrerNotEligible(_) => {
                "Only active members can create referrals".to_string()
            }
            ReferralError::RecipientUnavailable(_) => {
                "Recipient member not found or inactive".to_string()
            }
            ReferralError::NotParticipant { .. } => {
                "You do not have permission to view this referral".to_string()
            }
            ReferralError::RecipientOnly(_) => {
                "Only the member who received the referral can update its status".to_string()
            }
            ReferralError::MissingClosedValue(_) => {
                "A closed value is required when the status is CLOSED".to_string()
            }
            ReferralError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReferralError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReferralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReferralError {}

impl From<DomainError> for ReferralError {
    fn from(err: DomainError) -> Self {
        ReferralError::Infrastructure(err.to_string())
    }
}

impl From<ReferralError> for DomainError {
    fn from(err: ReferralError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
