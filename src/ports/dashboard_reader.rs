//! Dashboard reader port.

use async_trait::async_trait;

use crate::domain::dashboard::DashboardCounts;
use crate::domain::foundation::{DomainError, Timestamp};

/// Read-only port that collects the raw dashboard counts in one pass.
///
/// `month_start`/`month_end` bound the half-open window used for the
/// month-scoped numbers (see `domain::dashboard::month_window`).
#[async_trait]
pub trait DashboardReader: Send + Sync {
    async fn counts(
        &self,
        month_start: Timestamp,
        month_end: Timestamp,
    ) -> Result<DashboardCounts, DomainError>;
}
