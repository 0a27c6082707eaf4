//! CreateMemberHandler - Admin-initiated member creation.
//!
//! Variant of registration used when an admin signs a candidate up directly
//! against an approved intent. The invite preconditions are the same as for
//! self-service registration; the credential starts with a random temporary
//! password the member must reset on first login.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::credential::User;
use crate::domain::foundation::{ErrorCode, IntentId, MemberId, Timestamp, UserId};
use crate::domain::intent::IntentError;
use crate::domain::member::{Member, MemberError, MemberProfile};
use crate::ports::{
    CredentialHasher, IntentRepository, MemberRepository, NewRegistration, NotificationSink,
    RegistrationUnit, UserRepository,
};

/// Command to create a member from an approved intent.
#[derive(Debug, Clone)]
pub struct CreateMemberCommand {
    pub intent_id: IntentId,
    pub profile: MemberProfile,
}

/// Result of an admin-initiated member creation.
#[derive(Debug, Clone)]
pub struct CreateMemberResult {
    pub member: Member,
}

/// Handler for the admin member-creation variant.
pub struct CreateMemberHandler {
    intents: Arc<dyn IntentRepository>,
    members: Arc<dyn MemberRepository>,
    users: Arc<dyn UserRepository>,
    registration: Arc<dyn RegistrationUnit>,
    hasher: Arc<dyn CredentialHasher>,
    notifier: Arc<dyn NotificationSink>,
}

impl CreateMemberHandler {
    pub fn new(
        intents: Arc<dyn IntentRepository>,
        members: Arc<dyn MemberRepository>,
        users: Arc<dyn UserRepository>,
        registration: Arc<dyn RegistrationUnit>,
        hasher: Arc<dyn CredentialHasher>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            intents,
            members,
            users,
            registration,
            hasher,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CreateMemberCommand) -> Result<CreateMemberResult, MemberError> {
        // 1. Intent preconditions (identical to self-service registration)
        let intent = self
            .intents
            .find_by_id(&cmd.intent_id)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?
            .ok_or(MemberError::IntentNotFound(cmd.intent_id))?;

        intent
            .ensure_redeemable(Timestamp::now())
            .map_err(|e| match e {
                IntentError::NotApproved(id) => MemberError::IntentNotApproved(id),
                IntentError::TokenExpired(id) => MemberError::InviteExpired(id),
                other => MemberError::infrastructure(other.to_string()),
            })?;

        if self
            .members
            .find_by_intent(&intent.id)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(MemberError::InviteAlreadyUsed(intent.id));
        }

        // 2. Uniqueness guards
        let email_taken = self
            .members
            .find_by_email(&cmd.profile.email)
            .await
            .map_err(|e| MemberError::infrastructure(e.to_string()))?
            .is_some()
            || self
                .users
                .find_by_email(&cmd.profile.email)
                .await
                .map_err(|e| MemberError::infrastructure(e.to_string()))?
                .is_some();
        if email_taken {
            return Err(MemberError::EmailInUse(cmd.profile.email));
        }

        if let Some(cpf) = cmd.profile.cpf.as_deref() {
            if self
                .members
                .find_by_cpf(cpf)
                .await
                .map_err(|e| MemberError::infrastructure(e.to_string()))?
                .is_some()
            {
                return Err(MemberError::CpfInUse(cpf.to_string()));
            }
        }

        // 3. Temporary credential + profile, atomically
        let temp_password = Uuid::new_v4().simple().to_string();
        let password_hash = self
            .hasher
            .hash(&temp_password)
            .map_err(|e| MemberError::infrastructure(e.to_string()))?;

        let user = User::new_member(UserId::new(), cmd.profile.email.clone(), password_hash);
        let member = Member::register(MemberId::new(), user.id, intent.id, cmd.profile);

        self.registration
            .register(NewRegistration {
                user,
                member: member.clone(),
            })
            .await
            .map_err(|e| match e.code {
                ErrorCode::EmailInUse => MemberError::EmailInUse(member.email.clone()),
                ErrorCode::CpfInUse => {
                    MemberError::CpfInUse(member.cpf.clone().unwrap_or_default())
                }
                ErrorCode::TokenAlreadyUsed => MemberError::InviteAlreadyUsed(intent.id),
                _ => MemberError::infrastructure(e.to_string()),
            })?;

        self.notifier.registration_completed(&member).await;

        Ok(CreateMemberResult { member })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryIntentRepository, InMemoryMemberStore, RecordingNotificationSink,
    };
    use crate::domain::foundation::DomainError;
    use crate::domain::intent::{IntentSubmission, MembershipIntent};
    use crate::domain::member::MemberStatus;

    struct StubHasher;

    impl CredentialHasher for StubHasher {
        fn hash(&self, plain: &str) -> Result<String, DomainError> {
            Ok(format!("$stub${}", plain))
        }

        fn verify(&self, plain: &str, phc: &str) -> Result<bool, DomainError> {
            Ok(phc == format!("$stub${}", plain))
        }
    }

    fn approved_intent(email: &str) -> MembershipIntent {
        let mut intent = MembershipIntent::submit(
            IntentId::new(),
            IntentSubmission {
                full_name: "Carlos Ferreira".to_string(),
                email: email.to_string(),
                phone: None,
                company: None,
                industry: None,
                motivation: "join".to_string(),
            },
        );
        intent.approve(UserId::new(), None).unwrap();
        intent
    }

    fn profile(email: &str) -> MemberProfile {
        MemberProfile {
            full_name: "Carlos Ferreira".to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    struct Fixture {
        store: Arc<InMemoryMemberStore>,
        handler: CreateMemberHandler,
    }

    fn fixture_with(intent: MembershipIntent) -> Fixture {
        let intents = Arc::new(InMemoryIntentRepository::with_intents(vec![intent]));
        let store = Arc::new(InMemoryMemberStore::new());
        let notifier = Arc::new(RecordingNotificationSink::new());
        let handler = CreateMemberHandler::new(
            intents,
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(StubHasher),
            notifier,
        );
        Fixture { store, handler }
    }

    #[tokio::test]
    async fn creates_member_with_temporary_credential() {
        let intent = approved_intent("carlos@financas.com");
        let intent_id = intent.id;
        let f = fixture_with(intent);

        let result = f
            .handler
            .handle(CreateMemberCommand {
                intent_id,
                profile: profile("carlos@financas.com"),
            })
            .await
            .unwrap();

        assert_eq!(result.member.status, MemberStatus::Active);
        assert_eq!(f.store.users().len(), 1);
        // A hash was stored, not an empty or fixed credential.
        assert!(f.store.users()[0].password_hash.starts_with("$stub$"));
    }

    #[tokio::test]
    async fn unknown_intent_fails_not_found() {
        let f = fixture_with(approved_intent("carlos@financas.com"));

        let result = f
            .handler
            .handle(CreateMemberCommand {
                intent_id: IntentId::new(),
                profile: profile("carlos@financas.com"),
            })
            .await;

        assert!(matches!(result, Err(MemberError::IntentNotFound(_))));
    }

    #[tokio::test]
    async fn pending_intent_fails_not_approved() {
        let intent = MembershipIntent::submit(
            IntentId::new(),
            IntentSubmission {
                full_name: "Pendente".to_string(),
                email: "pendente@x.com".to_string(),
                phone: None,
                company: None,
                industry: None,
                motivation: "join".to_string(),
            },
        );
        let intent_id = intent.id;
        let f = fixture_with(intent);

        let result = f
            .handler
            .handle(CreateMemberCommand {
                intent_id,
                profile: profile("pendente@x.com"),
            })
            .await;

        assert!(matches!(result, Err(MemberError::IntentNotApproved(_))));
    }

    #[tokio::test]
    async fn expired_invite_fails() {
        let mut intent = approved_intent("carlos@financas.com");
        intent.token_expires_at = Some(Timestamp::now().minus_days(1));
        let intent_id = intent.id;
        let f = fixture_with(intent);

        let result = f
            .handler
            .handle(CreateMemberCommand {
                intent_id,
                profile: profile("carlos@financas.com"),
            })
            .await;

        assert!(matches!(result, Err(MemberError::InviteExpired(_))));
    }

    #[tokio::test]
    async fn consumed_invite_conflicts() {
        let intent = approved_intent("carlos@financas.com");
        let intent_id = intent.id;
        let f = fixture_with(intent);

        f.handler
            .handle(CreateMemberCommand {
                intent_id,
                profile: profile("carlos@financas.com"),
            })
            .await
            .unwrap();

        let result = f
            .handler
            .handle(CreateMemberCommand {
                intent_id,
                profile: profile("outro@x.com"),
            })
            .await;

        assert!(matches!(result, Err(MemberError::InviteAlreadyUsed(_))));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let intent = approved_intent("carlos@financas.com");
        let intent_id = intent.id;
        let f = fixture_with(intent);
        f.store.insert_member(Member::register(
            MemberId::new(),
            UserId::new(),
            IntentId::new(),
            profile("carlos@financas.com"),
        ));

        let result = f
            .handler
            .handle(CreateMemberCommand {
                intent_id,
                profile: profile("carlos@financas.com"),
            })
            .await;

        assert!(matches!(result, Err(MemberError::EmailInUse(_))));
    }
}
