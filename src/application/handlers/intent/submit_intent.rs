//! SubmitIntentHandler - Command handler for candidate submissions.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, IntentId};
use crate::domain::intent::{IntentError, IntentSubmission, MembershipIntent};
use crate::ports::{IntentRepository, MemberRepository, NotificationSink};

/// Command to record a candidate's intent to join.
#[derive(Debug, Clone)]
pub struct SubmitIntentCommand {
    pub submission: IntentSubmission,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitIntentResult {
    pub intent: MembershipIntent,
}

/// Handler for public intent submissions.
pub struct SubmitIntentHandler {
    intents: Arc<dyn IntentRepository>,
    members: Arc<dyn MemberRepository>,
    notifier: Arc<dyn NotificationSink>,
}

impl SubmitIntentHandler {
    pub fn new(
        intents: Arc<dyn IntentRepository>,
        members: Arc<dyn MemberRepository>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            intents,
            members,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitIntentCommand,
    ) -> Result<SubmitIntentResult, IntentError> {
        let email = cmd.submission.email.clone();

        // 1. One active intent per email
        if self
            .intents
            .find_active_by_email(&email)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(IntentError::ActiveIntentExists(email));
        }

        // 2. Already a member?
        if self
            .members
            .find_by_email(&email)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(IntentError::EmailRegistered(email));
        }

        // 3. Create and persist
        let intent = MembershipIntent::submit(IntentId::new(), cmd.submission);
        self.intents.save(&intent).await.map_err(|e| {
            // The partial unique index can still race in between the check
            // and the insert.
            if e.code == ErrorCode::ActiveIntentExists {
                IntentError::ActiveIntentExists(intent.email.clone())
            } else {
                IntentError::infrastructure(e.to_string())
            }
        })?;

        // 4. Fire-and-forget candidate notification
        self.notifier.intent_received(&intent).await;

        Ok(SubmitIntentResult { intent })
    }
}
