//! DeactivateMemberHandler - Soft deletion.

use std::sync::Arc;

use crate::domain::foundation::MemberId;
use crate::domain::member::{Member, MemberError};
use crate::ports::{MemberRepository, NotificationSink};

/// Command to soft-delete a member.
#[derive(Debug, Clone)]
pub struct DeactivateMemberCommand {
    pub member_id: MemberId,
}

/// Result of a deactivation.
#[derive(Debug, Clone)]
pub struct DeactivateMemberResult {
    pub member: Member,
    /// False when the member was already inactive (idempotent no-op).
    pub changed: bool,
}

/// Handler for member deactivation.
pub struct DeactivateMemberHandler {
    members: Arc<dyn MemberRepository>,
    notifier: Arc<dyn NotificationSink>,
}

impl DeactivateMemberHandler {
    pub fn new(members: Arc<dyn MemberRepository>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { members, notifier }
    }

    pub async fn handle(
        &self,
        cmd: DeactivateMemberCommand,
    ) -> Result<DeactivateMemberResult, MemberError> {
        let mut member = self
            .members
            .find_by_id(&cmd.member_id)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?
            .ok_or(MemberError::NotFound(cmd.member_id))?;

        let changed = member.deactivate();

        if changed {
            self.members
                .update(&member)
                .await
                .map_err(|e| MemberError::infrastructure(e.to_string()))?;
            self.notifier.member_deactivated(&member).await;
        }

        Ok(DeactivateMemberResult { member, changed })
    }
}
