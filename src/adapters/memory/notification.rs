//! Recording NotificationSink for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::intent::MembershipIntent;
use crate::domain::member::Member;
use crate::domain::referral::BusinessReferral;
use crate::ports::NotificationSink;

/// Captures notification calls as labelled strings for assertions.
#[derive(Default)]
pub struct RecordingNotificationSink {
    events: Mutex<Vec<String>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in call order.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// True if any recorded event starts with `prefix`.
    pub fn has_event(&self, prefix: &str) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.starts_with(prefix))
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn intent_received(&self, intent: &MembershipIntent) {
        self.record(format!("intent_received:{}", intent.email));
    }

    async fn intent_approved(&self, intent: &MembershipIntent, token: &str) {
        self.record(format!("intent_approved:{}:{}", intent.email, token));
    }

    async fn intent_rejected(&self, intent: &MembershipIntent) {
        self.record(format!("intent_rejected:{}", intent.email));
    }

    async fn registration_completed(&self, member: &Member) {
        self.record(format!("registration_completed:{}", member.email));
    }

    async fn member_deactivated(&self, member: &Member) {
        self.record(format!("member_deactivated:{}", member.email));
    }

    async fn referral_created(
        &self,
        referral: &BusinessReferral,
        _referrer: &Member,
        recipient: &Member,
    ) {
        self.record(format!(
            "referral_created:{}:{}",
            recipient.email, referral.client_name
        ));
    }

    async fn referral_status_changed(&self, referral: &BusinessReferral, referrer: &Member) {
        self.record(format!(
            "referral_status_changed:{}:{:?}",
            referrer.email, referral.status
        ));
    }
}
