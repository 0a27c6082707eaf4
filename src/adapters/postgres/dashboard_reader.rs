//! PostgreSQL implementation of DashboardReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::dashboard::DashboardCounts;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::DashboardReader;

/// PostgreSQL implementation of the DashboardReader port.
///
/// Collects every dashboard number in a single round trip.
pub struct PostgresDashboardReader {
    pool: PgPool,
}

impl PostgresDashboardReader {
    /// Creates a new reader backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CountsRow {
    total_members: i64,
    active_members: i64,
    new_members_this_month: i64,
    total_referrals: i64,
    pending_referrals: i64,
    closed_referrals: i64,
    referrals_this_month: i64,
    total_referral_value: i64,
    referral_value_this_month: i64,
    total_thank_yous: i64,
    thank_yous_this_month: i64,
}

#[async_trait]
impl DashboardReader for PostgresDashboardReader {
    async fn counts(
        &self,
        month_start: Timestamp,
        month_end: Timestamp,
    ) -> Result<DashboardCounts, DomainError> {
        let row: CountsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM members) AS total_members,
                (SELECT COUNT(*) FROM members WHERE status = 'ACTIVE') AS active_members,
                (SELECT COUNT(*) FROM members
                  WHERE created_at >= $1 AND created_at < $2) AS new_members_this_month,
                (SELECT COUNT(*) FROM business_referrals) AS total_referrals,
                (SELECT COUNT(*) FROM business_referrals
                  WHERE status = 'PENDING') AS pending_referrals,
                (SELECT COUNT(*) FROM business_referrals
                  WHERE status = 'CLOSED') AS closed_referrals,
                (SELECT COUNT(*) FROM business_referrals
                  WHERE created_at >= $1 AND created_at < $2) AS referrals_this_month,
                (SELECT COALESCE(SUM(closed_value), 0)::BIGINT FROM business_referrals
                  WHERE status = 'CLOSED') AS total_referral_value,
                (SELECT COALESCE(SUM(closed_value), 0)::BIGINT FROM business_referrals
                  WHERE status = 'CLOSED'
                    AND closed_at >= $1 AND closed_at < $2) AS referral_value_this_month,
                (SELECT COUNT(*) FROM thank_yous) AS total_thank_yous,
                (SELECT COUNT(*) FROM thank_yous
                  WHERE created_at >= $1 AND created_at < $2) AS thank_yous_this_month
            "#,
        )
        .bind(month_start.as_datetime())
        .bind(month_end.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load dashboard counts: {}", e)))?;

        Ok(DashboardCounts {
            total_members: row.total_members as u64,
            active_members: row.active_members as u64,
            new_members_this_month: row.new_members_this_month as u64,
            total_referrals: row.total_referrals as u64,
            pending_referrals: row.pending_referrals as u64,
            closed_referrals: row.closed_referrals as u64,
            referrals_this_month: row.referrals_this_month as u64,
            total_referral_value: row.total_referral_value,
            referral_value_this_month: row.referral_value_this_month,
            total_thank_yous: row.total_thank_yous as u64,
            thank_yous_this_month: row.thank_yous_this_month as u64,
        })
    }
}
