//! Review command handlers: approve and reject a pending intent.

use std::sync::Arc;

use crate::domain::foundation::{IntentId, UserId};
use crate::domain::intent::{IntentError, MembershipIntent};
use crate::ports::{IntentRepository, NotificationSink};

/// Command to approve a pending intent.
#[derive(Debug, Clone)]
pub struct ApproveIntentCommand {
    pub intent_id: IntentId,
    pub reviewer: UserId,
    pub notes: Option<String>,
}

/// Command to reject a pending intent.
#[derive(Debug, Clone)]
pub struct RejectIntentCommand {
    pub intent_id: IntentId,
    pub reviewer: UserId,
    pub reason: Option<String>,
}

/// Result of a review decision.
#[derive(Debug, Clone)]
pub struct ReviewIntentResult {
    pub intent: MembershipIntent,
}

/// Handler for admin review decisions.
pub struct ReviewIntentHandler {
    intents: Arc<dyn IntentRepository>,
    notifier: Arc<dyn NotificationSink>,
}

impl ReviewIntentHandler {
    pub fn new(intents: Arc<dyn IntentRepository>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { intents, notifier }
    }

    /// Approves a pending intent, issuing its invite token.
    pub async fn approve(
        &self,
        cmd: ApproveIntentCommand,
    ) -> Result<ReviewIntentResult, IntentError> {
        let mut intent = self.load(&cmd.intent_id).await?;

        let token = intent.approve(cmd.reviewer, cmd.notes)?;

        self.intents
            .update(&intent)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?;

        self.notifier.intent_approved(&intent, &token).await;

        Ok(ReviewIntentResult { intent })
    }

    /// Rejects a pending intent.
    pub async fn reject(
        &self,
        cmd: RejectIntentCommand,
    ) -> Result<ReviewIntentResult, IntentError> {
        let mut intent = self.load(&cmd.intent_id).await?;

        intent.reject(cmd.reviewer, cmd.reason)?;

        self.intents
            .update(&intent)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?;

        self.notifier.intent_rejected(&intent).await;

        Ok(ReviewIntentResult { intent })
    }

    async fn load(&self, id: &IntentId) -> Result<MembershipIntent, IntentError> {
        self.intents
            .find_by_id(id)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .ok_or(IntentError::NotFound(*id))
    }
}
