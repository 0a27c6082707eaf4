//! Notification sink port.
//!
//! Email delivery is out of scope; the core only announces what happened.
//! Sink calls are fire-and-forget: implementations swallow and log their own
//! failures, and the trait is infallible so callers can never be blocked or
//! rolled back by a notification problem.

use async_trait::async_trait;

use crate::domain::intent::MembershipIntent;
use crate::domain::member::Member;
use crate::domain::referral::BusinessReferral;

/// Outbound notification capability consumed by the application handlers.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// A candidate's submission was recorded.
    async fn intent_received(&self, intent: &MembershipIntent);

    /// An intent was approved; `token` is the freshly issued invite token.
    async fn intent_approved(&self, intent: &MembershipIntent, token: &str);

    /// An intent was rejected.
    async fn intent_rejected(&self, intent: &MembershipIntent);

    /// A candidate completed registration.
    async fn registration_completed(&self, member: &Member);

    /// A member was soft-deleted.
    async fn member_deactivated(&self, member: &Member);

    /// A new referral was passed to `recipient`.
    async fn referral_created(
        &self,
        referral: &BusinessReferral,
        referrer: &Member,
        recipient: &Member,
    );

    /// The recipient moved a referral to a new status; `referrer` is the
    /// member to inform.
    async fn referral_status_changed(&self, referral: &BusinessReferral, referrer: &Member);
}
