//! Membership intent repository port.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{DomainError, IntentId, Page, PageRequest, SortOrder};
use crate::domain::intent::{IntentStatus, MembershipIntent};

/// Sortable columns for intent listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentSortField {
    CreatedAt,
    FullName,
}

impl Default for IntentSortField {
    fn default() -> Self {
        IntentSortField::CreatedAt
    }
}

/// Filters for the admin intent listing.
#[derive(Debug, Clone, Default)]
pub struct IntentListFilter {
    /// Restrict to one review status.
    pub status: Option<IntentStatus>,
    /// Case-insensitive substring match over full name, email, and company.
    pub search: Option<String>,
    pub sort: IntentSortField,
    pub order: SortOrder,
}

/// Repository port for MembershipIntent persistence.
///
/// Implementations must keep the invite token globally unique and enforce
/// the one-active-intent-per-email constraint at the storage level.
#[async_trait]
pub trait IntentRepository: Send + Sync {
    /// Persist a new intent.
    ///
    /// # Errors
    ///
    /// - `ActiveIntentExists` if an active intent for the email races in
    /// - `DatabaseError` on persistence failure
    async fn save(&self, intent: &MembershipIntent) -> Result<(), DomainError>;

    /// Persist review-state changes of an existing intent.
    ///
    /// # Errors
    ///
    /// - `IntentNotFound` if the intent does not exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, intent: &MembershipIntent) -> Result<(), DomainError>;

    /// Find an intent by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: &IntentId) -> Result<Option<MembershipIntent>, DomainError>;

    /// Find an intent by its invite token. Returns `None` if no intent
    /// carries this token.
    async fn find_by_token(&self, token: &str) -> Result<Option<MembershipIntent>, DomainError>;

    /// Find the active (Pending or Approved) intent for an email, if any.
    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<MembershipIntent>, DomainError>;

    /// List intents with filtering, sorting, and pagination.
    async fn list(
        &self,
        filter: &IntentListFilter,
        page: PageRequest,
    ) -> Result<Page<MembershipIntent>, DomainError>;
}
