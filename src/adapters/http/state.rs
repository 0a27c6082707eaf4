//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::dashboard::GetDashboardStatsHandler;
use crate::application::handlers::intent::{
    CompleteRegistrationHandler, IntentQueryHandler, ReviewIntentHandler, SubmitIntentHandler,
    ValidateTokenHandler,
};
use crate::application::handlers::member::{
    CreateMemberHandler, DeactivateMemberHandler, MemberQueryHandler, UpdateMemberHandler,
};
use crate::application::handlers::referral::{
    CreateReferralHandler, ReferralQueryHandler, UpdateReferralStatusHandler,
};
use crate::ports::{
    CredentialHasher, DashboardReader, IntentRepository, MemberReader, MemberRepository,
    NotificationSink, ReferralRepository, RegistrationUnit, UserRepository,
};

/// Shared application state containing all port implementations.
///
/// Cloned per request; every dependency is Arc-wrapped. Handlers are
/// constructed on demand from the shared ports.
#[derive(Clone)]
pub struct AppState {
    pub intents: Arc<dyn IntentRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub member_reader: Arc<dyn MemberReader>,
    pub referrals: Arc<dyn ReferralRepository>,
    pub users: Arc<dyn UserRepository>,
    pub registration: Arc<dyn RegistrationUnit>,
    pub dashboard: Arc<dyn DashboardReader>,
    pub notifier: Arc<dyn NotificationSink>,
    pub hasher: Arc<dyn CredentialHasher>,
    /// Static API key required by the admin endpoints.
    pub admin_api_key: Arc<str>,
}

impl AppState {
    // Intent handlers

    pub fn submit_intent_handler(&self) -> SubmitIntentHandler {
        SubmitIntentHandler::new(
            self.intents.clone(),
            self.members.clone(),
            self.notifier.clone(),
        )
    }

    pub fn review_intent_handler(&self) -> ReviewIntentHandler {
        ReviewIntentHandler::new(self.intents.clone(), self.notifier.clone())
    }

    pub fn intent_query_handler(&self) -> IntentQueryHandler {
        IntentQueryHandler::new(self.intents.clone())
    }

    pub fn validate_token_handler(&self) -> ValidateTokenHandler {
        ValidateTokenHandler::new(self.intents.clone(), self.members.clone())
    }

    pub fn complete_registration_handler(&self) -> CompleteRegistrationHandler {
        CompleteRegistrationHandler::new(
            self.intents.clone(),
            self.members.clone(),
            self.users.clone(),
            self.registration.clone(),
            self.hasher.clone(),
            self.notifier.clone(),
        )
    }

    // Member handlers

    pub fn create_member_handler(&self) -> CreateMemberHandler {
        CreateMemberHandler::new(
            self.intents.clone(),
            self.members.clone(),
            self.users.clone(),
            self.registration.clone(),
            self.hasher.clone(),
            self.notifier.clone(),
        )
    }

    pub fn member_query_handler(&self) -> MemberQueryHandler {
        MemberQueryHandler::new(self.members.clone(), self.member_reader.clone())
    }

    pub fn update_member_handler(&self) -> UpdateMemberHandler {
        UpdateMemberHandler::new(self.members.clone())
    }

    pub fn deactivate_member_handler(&self) -> DeactivateMemberHandler {
        DeactivateMemberHandler::new(self.members.clone(), self.notifier.clone())
    }

    // Referral handlers

    pub fn create_referral_handler(&self) -> CreateReferralHandler {
        CreateReferralHandler::new(
            self.referrals.clone(),
            self.members.clone(),
            self.notifier.clone(),
        )
    }

    pub fn referral_query_handler(&self) -> ReferralQueryHandler {
        ReferralQueryHandler::new(self.referrals.clone())
    }

    pub fn update_referral_status_handler(&self) -> UpdateReferralStatusHandler {
        UpdateReferralStatusHandler::new(
            self.referrals.clone(),
            self.members.clone(),
            self.notifier.clone(),
        )
    }

    // Dashboard handlers

    pub fn dashboard_stats_handler(&self) -> GetDashboardStatsHandler {
        GetDashboardStatsHandler::new(self.dashboard.clone())
    }
}
