//! GetDashboardStatsHandler - Read-only group-wide rollups.

use std::sync::Arc;

use crate::domain::dashboard::{month_window, DashboardStats};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::DashboardReader;

/// Query for the admin dashboard statistics.
#[derive(Debug, Clone, Default)]
pub struct GetDashboardStatsQuery;

/// Handler for the dashboard statistics query.
pub struct GetDashboardStatsHandler {
    reader: Arc<dyn DashboardReader>,
}

impl GetDashboardStatsHandler {
    pub fn new(reader: Arc<dyn DashboardReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        _query: GetDashboardStatsQuery,
    ) -> Result<DashboardStats, DomainError> {
        let now = Timestamp::now();
        let (month_start, month_end) = month_window(now);

        let counts = self.reader.counts(month_start, month_end).await?;

        // An empty directory renders the illustrative demo dataset instead
        // of a wall of zeros.
        if counts.total_members == 0 {
            return Ok(DashboardStats::sample(now));
        }

        Ok(DashboardStats::from_counts(counts, now))
    }
}
