//! In-memory ReferralRepository for testing.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Page, PageRequest, ReferralId,
};
use crate::domain::referral::{
    BusinessReferral, ReferralStatistics, StatusChange,
};
use crate::ports::{ReferralListFilter, ReferralRepository, ReferralScope};

/// In-memory referral store for tests. Lock poisoning panics.
#[derive(Default)]
pub struct InMemoryReferralRepository {
    referrals: RwLock<Vec<BusinessReferral>>,
    history: RwLock<Vec<StatusChange>>,
}

impl InMemoryReferralRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored referral (for assertions).
    pub fn all(&self) -> Vec<BusinessReferral> {
        self.referrals.read().unwrap().clone()
    }

    /// Snapshot of a referral's history, oldest first (for assertions).
    pub fn history_for(&self, id: ReferralId) -> Vec<StatusChange> {
        self.history
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.referral_id == id)
            .cloned()
            .collect()
    }

    fn in_scope(referral: &BusinessReferral, member_id: MemberId, scope: ReferralScope) -> bool {
        match scope {
            ReferralScope::Given => referral.referrer_id == member_id,
            ReferralScope::Received => referral.referred_to_id == member_id,
            ReferralScope::All => referral.involves(member_id),
        }
    }
}

#[async_trait]
impl ReferralRepository for InMemoryReferralRepository {
    async fn save(
        &self,
        referral: &BusinessReferral,
        initial_change: &StatusChange,
    ) -> Result<(), DomainError> {
        self.referrals.write().unwrap().push(referral.clone());
        self.history.write().unwrap().push(initial_change.clone());
        Ok(())
    }

    async fn update(
        &self,
        referral: &BusinessReferral,
        change: &StatusChange,
    ) -> Result<(), DomainError> {
        let mut referrals = self.referrals.write().unwrap();
        match referrals.iter_mut().find(|r| r.id == referral.id) {
            Some(slot) => {
                *slot = referral.clone();
                self.history.write().unwrap().push(change.clone());
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ReferralNotFound,
                "Referral not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &ReferralId) -> Result<Option<BusinessReferral>, DomainError> {
        Ok(self
            .referrals
            .read()
            .unwrap()
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        member_id: &MemberId,
        filter: &ReferralListFilter,
        page: PageRequest,
    ) -> Result<Page<BusinessReferral>, DomainError> {
        let mut matching: Vec<BusinessReferral> = self
            .referrals
            .read()
            .unwrap()
            .iter()
            .filter(|r| Self::in_scope(r, *member_id, filter.scope))
            .filter(|r| filter.status.map(|s| r.status == s).unwrap_or(true))
            .filter(|r| {
                filter
                    .search
                    .as_deref()
                    .map(|needle| {
                        r.client_name
                            .to_lowercase()
                            .contains(&needle.to_lowercase())
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        matching.sort_by_key(|r| r.created_at);
        matching.reverse();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn history(&self, id: &ReferralId) -> Result<Vec<StatusChange>, DomainError> {
        let mut changes: Vec<StatusChange> = self
            .history
            .read()
            .unwrap()
            .iter()
            .filter(|c| &c.referral_id == id)
            .cloned()
            .collect();
        changes.sort_by_key(|c| c.changed_at);
        changes.reverse();
        Ok(changes)
    }

    async fn statistics(&self, member_id: &MemberId) -> Result<ReferralStatistics, DomainError> {
        let referrals = self.referrals.read().unwrap();
        Ok(ReferralStatistics::from_referrals(*member_id, &referrals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::referral::{ReferralDetails, ReferralStatus};

    fn details(client: &str) -> ReferralDetails {
        ReferralDetails {
            client_name: client.to_string(),
            description: "lead".to_string(),
            ..Default::default()
        }
    }

    fn create(referrer: MemberId, recipient: MemberId, client: &str) -> (BusinessReferral, StatusChange) {
        BusinessReferral::create(
            ReferralId::new(),
            referrer,
            recipient,
            UserId::new(),
            details(client),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_records_referral_and_initial_history() {
        let repo = InMemoryReferralRepository::new();
        let (referral, change) = create(MemberId::new(), MemberId::new(), "Cliente A");
        repo.save(&referral, &change).await.unwrap();

        assert_eq!(repo.all().len(), 1);
        let history = repo.history(&referral.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].from_status.is_none());
    }

    #[tokio::test]
    async fn update_appends_history_entries() {
        let repo = InMemoryReferralRepository::new();
        let (mut referral, change) = create(MemberId::new(), MemberId::new(), "Cliente A");
        repo.save(&referral, &change).await.unwrap();

        let change = referral
            .update_status(ReferralStatus::Contacted, None, None, UserId::new())
            .unwrap();
        repo.update(&referral, &change).await.unwrap();

        let history = repo.history(&referral.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].to_status, ReferralStatus::Contacted);
    }

    #[tokio::test]
    async fn update_unknown_referral_fails() {
        let repo = InMemoryReferralRepository::new();
        let (mut referral, _) = create(MemberId::new(), MemberId::new(), "Cliente A");
        let change = referral
            .update_status(ReferralStatus::Lost, None, None, UserId::new())
            .unwrap();

        let err = repo.update(&referral, &change).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReferralNotFound);
    }

    #[tokio::test]
    async fn list_scopes_given_and_received() {
        let repo = InMemoryReferralRepository::new();
        let alice = MemberId::new();
        let bob = MemberId::new();

        let (given, change) = create(alice, bob, "From Alice");
        repo.save(&given, &change).await.unwrap();
        let (received, change) = create(bob, alice, "To Alice");
        repo.save(&received, &change).await.unwrap();

        let filter = ReferralListFilter {
            scope: ReferralScope::Given,
            ..Default::default()
        };
        let page = repo.list(&alice, &filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].client_name, "From Alice");

        let filter = ReferralListFilter {
            scope: ReferralScope::Received,
            ..Default::default()
        };
        let page = repo.list(&alice, &filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].client_name, "To Alice");

        let page = repo
            .list(&alice, &ReferralListFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn list_searches_client_name_case_insensitively() {
        let repo = InMemoryReferralRepository::new();
        let alice = MemberId::new();
        let bob = MemberId::new();
        let (referral, change) = create(alice, bob, "Padaria do Bairro");
        repo.save(&referral, &change).await.unwrap();

        let filter = ReferralListFilter {
            search: Some("PADARIA".to_string()),
            ..Default::default()
        };
        let page = repo.list(&alice, &filter, PageRequest::default()).await.unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn statistics_delegate_to_domain_computation() {
        let repo = InMemoryReferralRepository::new();
        let alice = MemberId::new();
        let bob = MemberId::new();

        let (mut referral, change) = create(alice, bob, "Cliente");
        repo.save(&referral, &change).await.unwrap();
        let change = referral
            .update_status(ReferralStatus::Closed, None, Some(500_00), UserId::new())
            .unwrap();
        repo.update(&referral, &change).await.unwrap();

        let stats = repo.statistics(&bob).await.unwrap();
        assert_eq!(stats.total_received, 1);
        assert_eq!(stats.closed_received, 1);
        assert_eq!(stats.total_value_closed, 500_00);
    }
}
