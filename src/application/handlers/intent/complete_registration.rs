//! CompleteRegistrationHandler - Command handler for invite redemption.
//!
//! Re-runs the token validation, guards identity and uniqueness, then hands
//! credential + profile creation to the `RegistrationUnit` as one atomic
//! unit. A failure anywhere leaves no orphan credential and no phantom
//! member.

use std::sync::Arc;

use crate::domain::credential::User;
use crate::domain::foundation::{ErrorCode, MemberId, UserId};
use crate::domain::intent::IntentError;
use crate::domain::member::{Member, MemberProfile};
use crate::ports::{
    CredentialHasher, IntentRepository, MemberRepository, NewRegistration, NotificationSink,
    RegistrationUnit, UserRepository,
};

use super::{ValidateTokenHandler, ValidateTokenQuery};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Command to complete registration with an invite token.
#[derive(Debug, Clone)]
pub struct CompleteRegistrationCommand {
    pub invite_token: String,
    pub password: String,
    pub profile: MemberProfile,
}

/// Result of a completed registration.
#[derive(Debug, Clone)]
pub struct CompleteRegistrationResult {
    pub user_id: UserId,
    pub member: Member,
}

/// Handler for public registration completion.
pub struct CompleteRegistrationHandler {
    validate_token: ValidateTokenHandler,
    members: Arc<dyn MemberRepository>,
    users: Arc<dyn UserRepository>,
    registration: Arc<dyn RegistrationUnit>,
    hasher: Arc<dyn CredentialHasher>,
    notifier: Arc<dyn NotificationSink>,
}

impl CompleteRegistrationHandler {
    pub fn new(
        intents: Arc<dyn IntentRepository>,
        members: Arc<dyn MemberRepository>,
        users: Arc<dyn UserRepository>,
        registration: Arc<dyn RegistrationUnit>,
        hasher: Arc<dyn CredentialHasher>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            validate_token: ValidateTokenHandler::new(intents, members.clone()),
            members,
            users,
            registration,
            hasher,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteRegistrationCommand,
    ) -> Result<CompleteRegistrationResult, IntentError> {
        // 1. Same fail paths as the public validate-token endpoint
        let intent = self
            .validate_token
            .handle(ValidateTokenQuery {
                token: cmd.invite_token,
            })
            .await?;

        // 2. The token is bound to the invited identity
        if intent.email != cmd.profile.email {
            return Err(IntentError::EmailMismatch);
        }

        if cmd.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IntentError::validation(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        // 3. Uniqueness guards
        if self
            .users
            .find_by_email(&cmd.profile.email)
            .await
            .map_err(|e| IntentError::infrastructure(e.to_string()))?
            .is_some()
        {
            return Err(IntentError::EmailInUse(cmd.profile.email));
        }

        if let Some(cpf) = cmd.profile.cpf.as_deref() {
            if self
                .members
                .find_by_cpf(cpf)
                .await
                .map_err(|e| IntentError::infrastructure(e.to_string()))?
                .is_some()
            {
                return Err(IntentError::CpfInUse(cpf.to_string()));
            }
        }

        // 4. Hash the password, then provision credential + profile atomically
        let password_hash = self
            .hasher
            .hash(&cmd.password)
            .map_err(|e| IntentError::infrastructure(e.to_string()))?;

        let user = User::new_member(UserId::new(), cmd.profile.email.clone(), password_hash);
        let member = Member::register(MemberId::new(), user.id, intent.id, cmd.profile);

        self.registration
            .register(NewRegistration {
                user: user.clone(),
                member: member.clone(),
            })
            .await
            .map_err(|e| match e.code {
                ErrorCode::EmailInUse => IntentError::EmailInUse(member.email.clone()),
                ErrorCode::CpfInUse => {
                    IntentError::CpfInUse(member.cpf.clone().unwrap_or_default())
                }
                ErrorCode::TokenAlreadyUsed => IntentError::TokenAlreadyUsed(intent.id),
                _ => IntentError::infrastructure(e.to_string()),
            })?;

        // 5. Welcome the new member (fire-and-forget)
        self.notifier.registration_completed(&member).await;

        Ok(CompleteRegistrationResult {
            user_id: user.id,
            member,
        })
    }
}
