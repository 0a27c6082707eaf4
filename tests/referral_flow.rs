//! End-to-end referral lifecycle over the in-memory adapters.

use std::sync::Arc;

use conecta::adapters::memory::{
    InMemoryMemberStore, InMemoryReferralRepository, RecordingNotificationSink,
};
use conecta::application::handlers::referral::{
    CreateReferralCommand, CreateReferralHandler, GetReferralQuery, ListReferralsQuery,
    ReferralQueryHandler, UpdateReferralStatusCommand, UpdateReferralStatusHandler,
};
use conecta::domain::foundation::{IntentId, MemberId, PageRequest, UserId};
use conecta::domain::member::{Member, MemberProfile};
use conecta::domain::referral::{ReferralDetails, ReferralError, ReferralStatus};
use conecta::ports::{ReferralListFilter, ReferralScope};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Flow {
    referrals: Arc<InMemoryReferralRepository>,
    store: Arc<InMemoryMemberStore>,
    create: CreateReferralHandler,
    update: UpdateReferralStatusHandler,
    queries: ReferralQueryHandler,
    alice: Member,
    bob: Member,
}

fn member(name: &str, email: &str) -> Member {
    Member::register(
        MemberId::new(),
        UserId::new(),
        IntentId::new(),
        MemberProfile {
            full_name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        },
    )
}

fn flow() -> Flow {
    let referrals = Arc::new(InMemoryReferralRepository::new());
    let store = Arc::new(InMemoryMemberStore::with_referrals(referrals.clone()));
    let notifier = Arc::new(RecordingNotificationSink::new());

    let alice = member("Alice Almeida", "alice@x.com");
    let bob = member("Bob Barbosa", "bob@x.com");
    store.insert_member(alice.clone());
    store.insert_member(bob.clone());

    Flow {
        create: CreateReferralHandler::new(referrals.clone(), store.clone(), notifier.clone()),
        update: UpdateReferralStatusHandler::new(referrals.clone(), store.clone(), notifier),
        queries: ReferralQueryHandler::new(referrals.clone()),
        referrals,
        store,
        alice,
        bob,
    }
}

fn details(client: &str, estimated: Option<i64>) -> ReferralDetails {
    ReferralDetails {
        client_name: client.to_string(),
        client_phone: None,
        client_email: None,
        description: "Warm lead from a weekly meeting".to_string(),
        estimated_value: estimated,
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn referral_lifecycle_from_creation_to_close() {
    let f = flow();

    // Alice refers a client to Bob.
    let created = f
        .create
        .handle(CreateReferralCommand {
            referrer_id: f.alice.id,
            referred_to_id: f.bob.id,
            details: details("Padaria do Bairro", Some(30_000_00)),
        })
        .await
        .expect("creation should succeed");
    assert_eq!(created.referral.status, ReferralStatus::Pending);

    let referral_id = created.referral.id;

    // Only the recipient may drive the workflow.
    let by_referrer = f
        .update
        .handle(UpdateReferralStatusCommand {
            member_id: f.alice.id,
            referral_id,
            status: ReferralStatus::Contacted,
            feedback: None,
            closed_value: None,
        })
        .await;
    assert!(matches!(by_referrer, Err(ReferralError::RecipientOnly(_))));

    // Bob works the lead.
    f.update
        .handle(UpdateReferralStatusCommand {
            member_id: f.bob.id,
            referral_id,
            status: ReferralStatus::Negotiating,
            feedback: Some("quote sent".to_string()),
            closed_value: None,
        })
        .await
        .unwrap();

    // Closing without a value is rejected.
    let no_value = f
        .update
        .handle(UpdateReferralStatusCommand {
            member_id: f.bob.id,
            referral_id,
            status: ReferralStatus::Closed,
            feedback: None,
            closed_value: None,
        })
        .await;
    assert!(matches!(no_value, Err(ReferralError::MissingClosedValue(_))));

    // Closing with a value stamps closed_at.
    let closed = f
        .update
        .handle(UpdateReferralStatusCommand {
            member_id: f.bob.id,
            referral_id,
            status: ReferralStatus::Closed,
            feedback: Some("deal signed".to_string()),
            closed_value: Some(28_500_00),
        })
        .await
        .unwrap();
    assert_eq!(closed.referral.closed_value, Some(28_500_00));
    assert!(closed.referral.closed_at.is_some());

    // The history log captured every step, newest first.
    let detail = f
        .queries
        .get(GetReferralQuery {
            member_id: f.alice.id,
            referral_id,
        })
        .await
        .unwrap();
    let transitions: Vec<_> = detail.history.iter().map(|c| c.to_status).collect();
    assert_eq!(
        transitions,
        vec![
            ReferralStatus::Closed,
            ReferralStatus::Negotiating,
            ReferralStatus::Pending,
        ]
    );
    assert!(detail.history.last().unwrap().from_status.is_none());
}

#[tokio::test]
async fn statistics_reflect_both_sides_of_the_relation() {
    let f = flow();

    // Two referrals to Bob (one closed), one from Bob back to Alice.
    let first = f
        .create
        .handle(CreateReferralCommand {
            referrer_id: f.alice.id,
            referred_to_id: f.bob.id,
            details: details("Client A", None),
        })
        .await
        .unwrap();
    f.create
        .handle(CreateReferralCommand {
            referrer_id: f.alice.id,
            referred_to_id: f.bob.id,
            details: details("Client B", None),
        })
        .await
        .unwrap();
    f.create
        .handle(CreateReferralCommand {
            referrer_id: f.bob.id,
            referred_to_id: f.alice.id,
            details: details("Client C", None),
        })
        .await
        .unwrap();

    f.update
        .handle(UpdateReferralStatusCommand {
            member_id: f.bob.id,
            referral_id: first.referral.id,
            status: ReferralStatus::Closed,
            feedback: None,
            closed_value: Some(10_000_00),
        })
        .await
        .unwrap();

    let listing = f
        .queries
        .list(ListReferralsQuery {
            member_id: f.bob.id,
            filter: ReferralListFilter::default(),
            page: PageRequest::default(),
        })
        .await
        .unwrap();

    assert_eq!(listing.page.items.len(), 3);
    assert_eq!(listing.statistics.total_given, 1);
    assert_eq!(listing.statistics.total_received, 2);
    assert_eq!(listing.statistics.pending_received, 1);
    assert_eq!(listing.statistics.closed_received, 1);
    assert_eq!(listing.statistics.total_value_closed, 10_000_00);

    // Scoped listing narrows to one side.
    let given = f
        .queries
        .list(ListReferralsQuery {
            member_id: f.bob.id,
            filter: ReferralListFilter {
                scope: ReferralScope::Given,
                ..Default::default()
            },
            page: PageRequest::default(),
        })
        .await
        .unwrap();
    assert_eq!(given.page.items.len(), 1);
    assert_eq!(given.page.items[0].client_name, "Client C");

    // Member directory counters line up with the referral statistics.
    let stats = conecta::ports::MemberReader::statistics(f.store.as_ref(), &f.bob.id)
        .await
        .unwrap();
    assert_eq!(stats.referrals_received, 2);
    assert_eq!(stats.business_closed, 1);
    assert_eq!(stats.total_business_value, 10_000_00);
}

#[tokio::test]
async fn inactive_members_cannot_participate() {
    let f = flow();

    let mut carol = member("Carol", "carol@x.com");
    carol.deactivate();
    f.store.insert_member(carol.clone());

    // Inactive referrer.
    let result = f
        .create
        .handle(CreateReferralCommand {
            referrer_id: carol.id,
            referred_to_id: f.bob.id,
            details: details("Client", None),
        })
        .await;
    assert!(matches!(result, Err(ReferralError::ReferrerNotEligible(_))));

    // Inactive recipient.
    let result = f
        .create
        .handle(CreateReferralCommand {
            referrer_id: f.alice.id,
            referred_to_id: carol.id,
            details: details("Client", None),
        })
        .await;
    assert!(matches!(result, Err(ReferralError::RecipientUnavailable(_))));

    // Self-referral is rejected before any status check.
    let result = f
        .create
        .handle(CreateReferralCommand {
            referrer_id: carol.id,
            referred_to_id: carol.id,
            details: details("Client", None),
        })
        .await;
    assert!(matches!(result, Err(ReferralError::SelfReferral)));

    assert!(f.referrals.all().is_empty());
}
