//! ValidateTokenHandler - Query handler for invite token validation.
//!
//! Read-only and safely repeatable: validating a token any number of times
//! changes nothing. Registration completion re-runs exactly this check.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::intent::{IntentError, MembershipIntent};
use crate::ports::{IntentRepository, MemberRepository};

/// Query to validate an invite token.
#[derive(Debug, Clone)]
pub struct ValidateTokenQuery {
    pub token: String,
}

/// Handler for invite token validation.
pub struct ValidateTokenHandler {
    intents: Arc<dyn IntentRepository>,
    members: Arc<dyn MemberRepository>,
}

impl ValidateTokenHandler {
    pub fn new(intents: Arc<dyn IntentRepository>, members: Arc<dyn MemberRepository>) -> Self {
        Self { intents, members }
    }

    /// Returns the intent the token belongs to, if it is still redeemable.
    ///
    /// # Errors
    ///
    /// - `TokenNotFound` if no intent carries the token
    /// - `NotApproved` if the intent was never approved
    /// - `TokenExpired` if the validity window has passed
    /// - `TokenAlreadyUsed` if a member already references the intent
    pub async fn handle(
        &self,
        query: ValidateTokenQuery,
    ) -> Result<MembershipIntent, IntentError> {
        let intent = self
            .intents
            .find_by_token(&query.token)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .ok_or(IntentError::TokenNotFound)?;

        intent.ensure_redeemable(Timestamp::now())?;

        // Single-use: exactly one member may ever reference this intent.
        if self
            .members
            .find_by_intent(&intent.id)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(IntentError::TokenAlreadyUsed(intent.id));
        }

        Ok(intent)
    }
}
