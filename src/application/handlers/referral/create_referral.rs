//! CreateReferralHandler - Pass a lead to another member.

use std::sync::Arc;

use crate::domain::foundation::{MemberId, ReferralId};
use crate::domain::referral::{BusinessReferral, ReferralDetails, ReferralError};
use crate::ports::{MemberRepository, NotificationSink, ReferralRepository};

/// Command to create a referral.
#[derive(Debug, Clone)]
pub struct CreateReferralCommand {
    /// The authenticated member creating the referral.
    pub referrer_id: MemberId,
    pub referred_to_id: MemberId,
    pub details: ReferralDetails,
}

/// Result of a successful referral creation.
#[derive(Debug, Clone)]
pub struct CreateReferralResult {
    pub referral: BusinessReferral,
}

/// Handler for referral creation.
pub struct CreateReferralHandler {
    referrals: Arc<dyn ReferralRepository>,
    members: Arc<dyn MemberRepository>,
    notifier: Arc<dyn NotificationSink>,
}

impl CreateReferralHandler {
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
        cmd: CreateReferralCommand,
    ) -> Result<CreateReferralResult, ReferralError> {
        // Self-referral is barred outright, regardless of member status.
        if cmd.referrer_id == cmd.referred_to_id {
            return Err(ReferralError::SelfReferral);
        }

        let referrer = self
            .members
            .find_by_id(&cmd.referrer_id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?
            .filter(|m| m.is_active())
            .ok_or(ReferralError::ReferrerNotEligible(cmd.referrer_id))?;

        let recipient = self
            .members
            .find_by_id(&cmd.referred_to_id)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?
            .filter(|m| m.is_active())
            .ok_or(ReferralError::RecipientUnavailable(cmd.referred_to_id))?;

        let (referral, initial_change) = BusinessReferral::create(
            ReferralId::new(),
            referrer.id,
            recipient.id,
            referrer.user_id,
            cmd.details,
        )?;

        self.referrals
            .save(&referral, &initial_change)
            .await
            .map_err(|e| ReferralError::infrastructure(e.to_string()))?;

        self.notifier
            .referral_created(&referral, &referrer, &recipient)
            .await;

        Ok(CreateReferralResult { referral })
    }
}
