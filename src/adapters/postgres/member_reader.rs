//! PostgreSQL implementation of MemberReader.
//!
//! Read-optimized queries: the directory listing fetches referral counters
//! through scalar subqueries, and the statistics query collects every number
//! in one round trip.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, MemberId, Page, PageRequest, Timestamp};
use crate::ports::{
    MemberListFilter, MemberListStats, MemberReader, MemberStatistics, MemberSummary,
};

use super::member_repository::{member_status_to_str, parse_member_status};

/// PostgreSQL implementation of the MemberReader port.
pub struct PostgresMemberReader {
    pool: PgPool,
}

impl PostgresMemberReader {
    /// Creates a new reader backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberSummaryRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    position: Option<String>,
    industry: Option<String>,
    photo_url: Option<String>,
    status: String,
    membership_start_date: DateTime<Utc>,
    referrals_given: i64,
    referrals_received: i64,
    business_closed: i64,
    total_value: i64,
}

impl TryFrom<MemberSummaryRow> for MemberSummary {
    type Error = DomainError;

    fn try_from(row: MemberSummaryRow) -> Result<Self, Self::Error> {
        Ok(MemberSummary {
            id: MemberId::from_uuid(row.id),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            position: row.position,
            industry: row.industry,
            photo_url: row.photo_url,
            status: parse_member_status(&row.status)?,
            membership_start_date: Timestamp::from_datetime(row.membership_start_date),
            stats: MemberListStats {
                referrals_given: row.referrals_given as u64,
                referrals_received: row.referrals_received as u64,
                business_closed: row.business_closed as u64,
                total_value: row.total_value,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberStatisticsRow {
    referrals_given: i64,
    referrals_received: i64,
    business_closed: i64,
    total_business_value: i64,
    meetings_attended: i64,
    meetings_scheduled: i64,
    one_on_one_meetings: i64,
}

const LIST_WHERE_CLAUSE: &str = "WHERE ($1::text IS NULL OR m.status = $1) \
     AND ($2::text IS NULL OR m.industry ILIKE '%' || $2 || '%') \
     AND ($3::text IS NULL \
          OR m.full_name ILIKE '%' || $3 || '%' \
          OR m.email ILIKE '%' || $3 || '%' \
          OR m.company ILIKE '%' || $3 || '%')";

#[async_trait]
impl MemberReader for PostgresMemberReader {
    async fn list(
        &self,
        filter: &MemberListFilter,
        page: PageRequest,
    ) -> Result<Page<MemberSummary>, DomainError> {
        let status = filter.status.map(member_status_to_str);
        let industry = filter.industry.as_deref();
        let search = filter.search.as_deref();

        let rows: Vec<MemberSummaryRow> = sqlx::query_as(&format!(
            r#"
            SELECT m.id, m.full_name, m.email, m.phone, m.company, m.position,
                   m.industry, m.photo_url, m.status, m.membership_start_date,
                   (SELECT COUNT(*) FROM business_referrals r
                     WHERE r.referrer_id = m.id) AS referrals_given,
                   (SELECT COUNT(*) FROM business_referrals r
                     WHERE r.referred_to_id = m.id) AS referrals_received,
                   (SELECT COUNT(*) FROM business_referrals r
                     WHERE r.referred_to_id = m.id AND r.status = 'CLOSED') AS business_closed,
                   (SELECT COALESCE(SUM(r.closed_value), 0)::BIGINT FROM business_referrals r
                     WHERE r.referred_to_id = m.id AND r.status = 'CLOSED') AS total_value
            FROM members m
            {}
            ORDER BY m.created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            LIST_WHERE_CLAUSE
        ))
        .bind(status)
        .bind(industry)
        .bind(search)
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list members: {}", e)))?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM members m {}",
            LIST_WHERE_CLAUSE
        ))
        .bind(status)
        .bind(industry)
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count members: {}", e)))?;

        let items = rows
            .into_iter()
            .map(MemberSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total as u64))
    }

    async fn statistics(&self, member_id: &MemberId) -> Result<MemberStatistics, DomainError> {
        let row: MemberStatisticsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM business_referrals r
                  WHERE r.referrer_id = $1) AS referrals_given,
                (SELECT COUNT(*) FROM business_referrals r
                  WHERE r.referred_to_id = $1) AS referrals_received,
                (SELECT COUNT(*) FROM business_referrals r
                  WHERE r.referred_to_id = $1 AND r.status = 'CLOSED') AS business_closed,
                (SELECT COALESCE(SUM(r.closed_value), 0)::BIGINT FROM business_referrals r
                  WHERE r.referred_to_id = $1 AND r.status = 'CLOSED') AS total_business_value,
                (SELECT COUNT(*) FROM meeting_attendances a
                  WHERE a.member_id = $1 AND a.status IN ('PRESENT', 'LATE')) AS meetings_attended,
                (SELECT COUNT(*) FROM meeting_attendances a
                  WHERE a.member_id = $1) AS meetings_scheduled,
                (SELECT COUNT(*) FROM one_on_one_meetings o
                  WHERE (o.member1_id = $1 OR o.member2_id = $1)
                    AND o.status = 'COMPLETED') AS one_on_one_meetings
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load member statistics: {}", e)))?;

        Ok(MemberStatistics {
            referrals_given: row.referrals_given as u64,
            referrals_received: row.referrals_received as u64,
            business_closed: row.business_closed as u64,
            total_business_value: row.total_business_value,
            meetings_attended: row.meetings_attended as u64,
            attendance_rate: MemberStatistics::attendance_rate(
                row.meetings_attended as u64,
                row.meetings_scheduled as u64,
            ),
            one_on_one_meetings: row.one_on_one_meetings as u64,
        })
    }
}
