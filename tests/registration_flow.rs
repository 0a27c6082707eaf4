//! End-to-end membership lifecycle over the in-memory adapters.
//!
//! Walks the full intent -> invite token -> registration flow through the
//! application handlers, including the duplicate-submission, token-hijack,
//! single-use, and atomicity guarantees.

use std::sync::Arc;

use conecta::adapters::memory::{
    InMemoryIntentRepository, InMemoryMemberStore, RecordingNotificationSink,
};
use conecta::application::handlers::intent::{
    ApproveIntentCommand, CompleteRegistrationCommand, CompleteRegistrationHandler,
    ReviewIntentHandler, SubmitIntentCommand, SubmitIntentHandler, ValidateTokenHandler,
    ValidateTokenQuery,
};
use conecta::domain::foundation::{DomainError, Timestamp, UserId};
use conecta::domain::intent::{IntentError, IntentStatus, IntentSubmission};
use conecta::domain::member::{MemberProfile, MemberStatus};
use conecta::ports::{CredentialHasher, IntentRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct StubHasher;

impl CredentialHasher for StubHasher {
    fn hash(&self, plain: &str) -> Result<String, DomainError> {
        Ok(format!("$stub${}", plain))
    }

    fn verify(&self, plain: &str, phc: &str) -> Result<bool, DomainError> {
        Ok(phc == format!("$stub${}", plain))
    }
}

struct Flow {
    intents: Arc<InMemoryIntentRepository>,
    store: Arc<InMemoryMemberStore>,
    notifier: Arc<RecordingNotificationSink>,
    submit: SubmitIntentHandler,
    review: ReviewIntentHandler,
    validate: ValidateTokenHandler,
    complete: CompleteRegistrationHandler,
}

fn flow() -> Flow {
    let intents = Arc::new(InMemoryIntentRepository::new());
    let store = Arc::new(InMemoryMemberStore::new());
    let notifier = Arc::new(RecordingNotificationSink::new());

    Flow {
        submit: SubmitIntentHandler::new(intents.clone(), store.clone(), notifier.clone()),
        review: ReviewIntentHandler::new(intents.clone(), notifier.clone()),
        validate: ValidateTokenHandler::new(intents.clone(), store.clone()),
        complete: CompleteRegistrationHandler::new(
            intents.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(StubHasher),
            notifier.clone(),
        ),
        intents,
        store,
        notifier,
    }
}

fn submission(email: &str) -> IntentSubmission {
    IntentSubmission {
        full_name: "João Silva".to_string(),
        email: email.to_string(),
        phone: Some("+5511999999999".to_string()),
        company: Some("Empresa XPTO Ltda".to_string()),
        industry: Some("Technology".to_string()),
        motivation: "Grow my referral network".to_string(),
    }
}

fn profile(email: &str) -> MemberProfile {
    MemberProfile {
        full_name: "João Silva".to_string(),
        email: email.to_string(),
        cpf: Some("123.456.789-00".to_string()),
        company: Some("Empresa XPTO Ltda".to_string()),
        ..Default::default()
    }
}

// =============================================================================
// The full lifecycle
// =============================================================================

#[tokio::test]
async fn full_lifecycle_from_submission_to_registration() {
    let f = flow();

    // Submit: 201-equivalent, intent is PENDING.
    let submitted = f
        .submit
        .handle(SubmitIntentCommand {
            submission: submission("joao@x.com"),
        })
        .await
        .expect("submission should succeed");
    assert_eq!(submitted.intent.status, IntentStatus::Pending);
    assert!(f.notifier.has_event("intent_received:joao@x.com"));

    // Duplicate submission while still pending: conflict.
    let duplicate = f
        .submit
        .handle(SubmitIntentCommand {
            submission: submission("joao@x.com"),
        })
        .await;
    assert!(matches!(duplicate, Err(IntentError::ActiveIntentExists(_))));

    // Approve: token issued, expires about 7 days out.
    let approved = f
        .review
        .approve(ApproveIntentCommand {
            intent_id: submitted.intent.id,
            reviewer: UserId::new(),
            notes: None,
        })
        .await
        .expect("approval should succeed");
    let token = approved.intent.invite_token.clone().expect("token issued");
    let days_left = approved
        .intent
        .token_expires_at
        .unwrap()
        .duration_since(&Timestamp::now())
        .num_days();
    assert!((6..=7).contains(&days_left));

    // Validate: token is redeemable, repeatably.
    for _ in 0..2 {
        f.validate
            .handle(ValidateTokenQuery {
                token: token.clone(),
            })
            .await
            .expect("validation should succeed");
    }

    // Complete with a mismatched email: the token is bound to the invitee.
    let hijack = f
        .complete
        .handle(CompleteRegistrationCommand {
            invite_token: token.clone(),
            password: "s3nh4-f0rte".to_string(),
            profile: profile("intruder@evil.com"),
        })
        .await;
    assert!(matches!(hijack, Err(IntentError::EmailMismatch)));
    assert!(f.store.members().is_empty());

    // Complete with the invited email: member is ACTIVE, credential exists.
    let completed = f
        .complete
        .handle(CompleteRegistrationCommand {
            invite_token: token.clone(),
            password: "s3nh4-f0rte".to_string(),
            profile: profile("joao@x.com"),
        })
        .await
        .expect("registration should succeed");
    assert_eq!(completed.member.status, MemberStatus::Active);
    assert_eq!(f.store.users().len(), 1);
    assert_eq!(f.store.members().len(), 1);
    assert_eq!(f.store.users()[0].id, completed.user_id);
    assert!(f.notifier.has_event("registration_completed:joao@x.com"));

    // Re-validate the consumed token: single-use invariant.
    let reused = f.validate.handle(ValidateTokenQuery { token }).await;
    assert!(matches!(reused, Err(IntentError::TokenAlreadyUsed(_))));
}

#[tokio::test]
async fn expired_token_cannot_be_redeemed() {
    let f = flow();

    let submitted = f
        .submit
        .handle(SubmitIntentCommand {
            submission: submission("maria@x.com"),
        })
        .await
        .unwrap();
    let approved = f
        .review
        .approve(ApproveIntentCommand {
            intent_id: submitted.intent.id,
            reviewer: UserId::new(),
            notes: None,
        })
        .await
        .unwrap();

    // Age the token past its window.
    let mut expired = approved.intent.clone();
    expired.token_expires_at = Some(Timestamp::now().minus_days(1));
    f.intents.update(&expired).await.unwrap();

    let token = expired.invite_token.unwrap();
    let result = f
        .complete
        .handle(CompleteRegistrationCommand {
            invite_token: token,
            password: "s3nh4-f0rte".to_string(),
            profile: profile("maria@x.com"),
        })
        .await;
    assert!(matches!(result, Err(IntentError::TokenExpired(_))));
    assert!(f.store.users().is_empty());
}

// =============================================================================
// Atomicity
// =============================================================================

#[tokio::test]
async fn failed_registration_leaves_state_untouched() {
    let f = flow();

    let submitted = f
        .submit
        .handle(SubmitIntentCommand {
            submission: submission("ana@x.com"),
        })
        .await
        .unwrap();
    let approved = f
        .review
        .approve(ApproveIntentCommand {
            intent_id: submitted.intent.id,
            reviewer: UserId::new(),
            notes: None,
        })
        .await
        .unwrap();
    let token = approved.intent.invite_token.clone().unwrap();

    // Inject a failure inside the atomic unit.
    f.store.set_fail_registration(true);
    let result = f
        .complete
        .handle(CompleteRegistrationCommand {
            invite_token: token.clone(),
            password: "s3nh4-f0rte".to_string(),
            profile: profile("ana@x.com"),
        })
        .await;
    assert!(result.is_err());

    // No orphan credential, no phantom member.
    assert!(f.store.users().is_empty());
    assert!(f.store.members().is_empty());

    // The token was not consumed: retrying after the fault succeeds.
    f.store.set_fail_registration(false);
    let retried = f
        .complete
        .handle(CompleteRegistrationCommand {
            invite_token: token,
            password: "s3nh4-f0rte".to_string(),
            profile: profile("ana@x.com"),
        })
        .await;
    assert!(retried.is_ok());
    assert_eq!(f.store.users().len(), 1);
    assert_eq!(f.store.members().len(), 1);
}
