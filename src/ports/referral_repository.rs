//! Business referral repository port.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{DomainError, MemberId, Page, PageRequest, ReferralId};
use crate::domain::referral::{BusinessReferral, ReferralStatistics, ReferralStatus, StatusChange};

/// Which side of the referral relation a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralScope {
    /// Referrals the member created.
    Given,
    /// Referrals the member received.
    Received,
    /// Both sides.
    All,
}

impl Default for ReferralScope {
    fn default() -> Self {
        ReferralScope::All
    }
}

/// Filters for a member's referral listing.
#[derive(Debug, Clone, Default)]
pub struct ReferralListFilter {
    pub scope: ReferralScope,
    pub status: Option<ReferralStatus>,
    /// Case-insensitive substring match on the client name.
    pub search: Option<String>,
}

/// Repository port for BusinessReferral persistence.
///
/// Every write carries its history record: implementations persist the
/// referral row and the appended `StatusChange` together.
#[async_trait]
pub trait ReferralRepository: Send + Sync {
    /// Persist a new referral plus its initial history record.
    async fn save(
        &self,
        referral: &BusinessReferral,
        initial_change: &StatusChange,
    ) -> Result<(), DomainError>;

    /// Persist a status update plus the appended history record.
    ///
    /// # Errors
    ///
    /// - `ReferralNotFound` if the referral does not exist
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        referral: &BusinessReferral,
        change: &StatusChange,
    ) -> Result<(), DomainError>;

    /// Find a referral by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &ReferralId) -> Result<Option<BusinessReferral>, DomainError>;

    /// List a member's referrals, newest first.
    async fn list(
        &self,
        member_id: &MemberId,
        filter: &ReferralListFilter,
        page: PageRequest,
    ) -> Result<Page<BusinessReferral>, DomainError>;

    /// Full status history of a referral, newest first.
    async fn history(&self, id: &ReferralId) -> Result<Vec<StatusChange>, DomainError>;

    /// Per-member statistics, recomputed on every call.
    async fn statistics(&self, member_id: &MemberId) -> Result<ReferralStatistics, DomainError>;
}
