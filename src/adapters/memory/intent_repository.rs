//! In-memory IntentRepository for testing.
//!
//! Mirrors the storage-level guarantees the postgres adapter gets from its
//! indexes: unique invite tokens and at most one active intent per email.
//! Not for production use; lock poisoning panics.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, IntentId, Page, PageRequest, SortOrder,
};
use crate::domain::intent::MembershipIntent;
use crate::ports::{IntentListFilter, IntentRepository, IntentSortField};

/// In-memory intent store for tests.
#[derive(Default)]
pub struct InMemoryIntentRepository {
    intents: RwLock<Vec<MembershipIntent>>,
}

impl InMemoryIntentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing intents.
    pub fn with_intents(intents: Vec<MembershipIntent>) -> Self {
        Self {
            intents: RwLock::new(intents),
        }
    }

    /// Snapshot of every stored intent (for assertions).
    pub fn all(&self) -> Vec<MembershipIntent> {
        self.intents.read().unwrap().clone()
    }
}

fn matches_search(intent: &MembershipIntent, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    intent.full_name.to_lowercase().contains(&needle)
        || intent.email.to_lowercase().contains(&needle)
        || intent
            .company
            .as_deref()
            .map(|c| c.to_lowercase().contains(&needle))
            .unwrap_or(false)
}

#[async_trait]
impl IntentRepository for InMemoryIntentRepository {
    async fn save(&self, intent: &MembershipIntent) -> Result<(), DomainError> {
        let mut intents = self.intents.write().unwrap();
        if intents
            .iter()
            .any(|i| i.email == intent.email && i.is_active())
        {
            return Err(DomainError::new(
                ErrorCode::ActiveIntentExists,
                "An active membership intent already exists for this email",
            ));
        }
        intents.push(intent.clone());
        Ok(())
    }

    async fn update(&self, intent: &MembershipIntent) -> Result<(), DomainError> {
        let mut intents = self.intents.write().unwrap();
        match intents.iter_mut().find(|i| i.id == intent.id) {
            Some(slot) => {
                *slot = intent.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::IntentNotFound,
                "Membership intent not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &IntentId) -> Result<Option<MembershipIntent>, DomainError> {
        Ok(self
            .intents
            .read()
            .unwrap()
            .iter()
            .find(|i| &i.id == id)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<MembershipIntent>, DomainError> {
        Ok(self
            .intents
            .read()
            .unwrap()
            .iter()
            .find(|i| i.invite_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<MembershipIntent>, DomainError> {
        Ok(self
            .intents
            .read()
            .unwrap()
            .iter()
            .find(|i| i.email == email && i.is_active())
            .cloned())
    }

    async fn list(
        &self,
        filter: &IntentListFilter,
        page: PageRequest,
    ) -> Result<Page<MembershipIntent>, DomainError> {
        let mut matching: Vec<MembershipIntent> = self
            .intents
            .read()
            .unwrap()
            .iter()
            .filter(|i| filter.status.map(|s| i.status == s).unwrap_or(true))
            .filter(|i| {
                filter
                    .search
                    .as_deref()
                    .map(|needle| matches_search(i, needle))
                    .unwrap_or(true)
            })
            .cloned()
            .collect();

        match filter.sort {
            IntentSortField::CreatedAt => matching.sort_by_key(|i| i.created_at),
            IntentSortField::FullName => matching.sort_by(|a, b| a.full_name.cmp(&b.full_name)),
        }
        if filter.order == SortOrder::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page::new(items, page, total))
    }
}
