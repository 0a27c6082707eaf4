//! Tracing-backed NotificationSink.
//!
//! Stands in for real email delivery: every notification becomes a
//! structured log event. Infallible by construction, so the calling
//! handlers can never be blocked by it.

use async_trait::async_trait;

use crate::domain::intent::MembershipIntent;
use crate::domain::member::Member;
use crate::domain::referral::BusinessReferral;
use crate::ports::NotificationSink;

/// Notification sink that writes structured log events.
#[derive(Debug, Default, Clone)]
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn intent_received(&self, intent: &MembershipIntent) {
        tracing::info!(
            candidate = %intent.email,
            name = %intent.full_name,
            "membership intent received; confirmation email queued"
        );
    }

    async fn intent_approved(&self, intent: &MembershipIntent, token: &str) {
        let valid_until = intent
            .token_expires_at
            .map(|t| t.as_datetime().to_rfc3339())
            .unwrap_or_default();
        tracing::info!(
            candidate = %intent.email,
            name = %intent.full_name,
            invite_token = %token,
            %valid_until,
            "membership intent approved; invite email queued"
        );
    }

    async fn intent_rejected(&self, intent: &MembershipIntent) {
        tracing::info!(
            candidate = %intent.email,
            reason = intent.rejection_reason.as_deref().unwrap_or("not given"),
            "membership intent rejected; notification email queued"
        );
    }

    async fn registration_completed(&self, member: &Member) {
        tracing::info!(
            member = %member.email,
            member_id = %member.id,
            name = %member.full_name,
            "registration completed; welcome email queued"
        );
    }

    async fn member_deactivated(&self, member: &Member) {
        tracing::info!(
            member = %member.email,
            member_id = %member.id,
            "member deactivated; notification email queued"
        );
    }

    async fn referral_created(
        &self,
        referral: &BusinessReferral,
        referrer: &Member,
        recipient: &Member,
    ) {
        tracing::info!(
            to = %recipient.email,
            from = %referrer.full_name,
            client = %referral.client_name,
            "new referral received; notification email queued"
        );
    }

    async fn referral_status_changed(&self, referral: &BusinessReferral, referrer: &Member) {
        tracing::info!(
            to = %referrer.email,
            client = %referral.client_name,
            status = ?referral.status,
            "referral status changed; notification email queued"
        );
    }
}
