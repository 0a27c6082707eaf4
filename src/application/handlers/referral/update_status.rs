//! UpdateReferralStatusHandler - Recipient-driven workflow transitions.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, ReferralId};
use crate::domain::referral::{BusinessReferral, ReferralError, ReferralStatus};
use crate::ports::{MemberRepository, NotificationSink, ReferralRepository};

/// Command to move a referral to a new status.
#[derive(Debug, Clone)]
pub struct UpdateReferralStatusCommand {
    /// The authenticated member performing the change.
    pub member_id: MemberId,
    pub referral_id: ReferralId,
    pub status: ReferralStatus,
    pub feedback: Option<String>,
    /// Final deal value in cents; required when `status` is Closed.
    pub closed_value: Option<i64>,
}

/// Result of a status change.
#[derive(Debug, Clone)]
pub struct UpdateReferralStatusResult {
    pub referral: BusinessReferral,
}

/// Handler for referral status updates.
pub struct UpdateReferralStatusHandler {
    referrals: Arc<dyn ReferralRepository>,
    members: Arc<dyn MemberRepository>,
    notifier: Arc<dyn NotificationSink>,
}

impl UpdateReferralStatusHandler {
    pub fn new(
        referrals: Arc<dyn ReferralRepository>,
        members: Arc<dyn MemberRepository>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            referrals,
            members,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateReferralStatusCommand,
    ) -> Result<UpdateReferralStatusResult, ReferralError> {
        let mut referral = self
            .referrals
            .find_by_id(&cmd.referral_id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?
            .ok_or(ReferralError::NotFound(cmd.referral_id))?;

        if !referral.involves(cmd.member_id) {
            return Err(ReferralError::not_participant(cmd.referral_id, cmd.member_id));
        }
        if !referral.is_received_by(cmd.member_id) {
            return Err(ReferralError::RecipientOnly(cmd.referral_id));
        }

        // The acting user is recorded in the history log.
        let acting_member = self
            .members
            .find_by_id(&cmd.member_id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                ReferralError::infrastructure("acting member record is missing")
            })?;

        let change = referral.update_status(
            cmd.status,
            cmd.feedback,
            cmd.closed_value,
            acting_member.user_id,
        )?;

        self.referrals
            .update(&referral, &change)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?;

        // Tell the referrer what happened to their lead (fire-and-forget).
        if let Ok(Some(referrer)) = self.members.find_by_id(&referral.referrer_id).await {
            self.notifier
                .referral_status_changed(&referral, &referrer)
                .await;
        }

        Ok(UpdateReferralStatusResult { referral })
    }
}
