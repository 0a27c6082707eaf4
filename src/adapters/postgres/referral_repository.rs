//! PostgreSQL implementation of ReferralRepository.
//!
//! Referral writes and their history records are persisted in the same
//! transaction so the log can never drift from the referral row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, Page, PageRequest, ReferralId, Timestamp, UserId,
};
use crate::domain::referral::{
    BusinessReferral, ReferralStatistics, ReferralStatus, StatusChange,
};
use crate::ports::{ReferralListFilter, ReferralRepository, ReferralScope};

/// PostgreSQL implementation of the ReferralRepository port.
pub struct PostgresReferralRepository {
    pool: PgPool,
}

impl PostgresReferralRepository {
    /// Creates a new repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REFERRAL_COLUMNS: &str = "id, referrer_id, referred_to_id, client_name, client_phone, client_email, \
     description, estimated_value, status, feedback, closed_value, closed_at, \
     created_at, updated_at";

/// Database row representation of a referral.
#[derive(Debug, sqlx::FromRow)]
struct ReferralRow {
    id: Uuid,
    referrer_id: Uuid,
    referred_to_id: Uuid,
    client_name: String,
    client_phone: Option<String>,
    client_email: Option<String>,
    description: String,
    estimated_value: Option<i64>,
    status: String,
    feedback: Option<String>,
    closed_value: Option<i64>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReferralRow> for BusinessReferral {
    type Error = DomainError;

    fn try_from(row: ReferralRow) -> Result<Self, Self::Error> {
        Ok(BusinessReferral {
            id: ReferralId::from_uuid(row.id),
            referrer_id: MemberId::from_uuid(row.referrer_id),
            referred_to_id: MemberId::from_uuid(row.referred_to_id),
            client_name: row.client_name,
            client_phone: row.client_phone,
            client_email: row.client_email,
            description: row.description,
            estimated_value: row.estimated_value,
            status: parse_referral_status(&row.status)?,
            feedback: row.feedback,
            closed_value: row.closed_value,
            closed_at: row.closed_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Database row representation of a history entry.
#[derive(Debug, sqlx::FromRow)]
struct StatusChangeRow {
    referral_id: Uuid,
    from_status: Option<String>,
    to_status: String,
    changed_by: Uuid,
    notes: Option<String>,
    changed_at: DateTime<Utc>,
}

impl TryFrom<StatusChangeRow> for StatusChange {
    type Error = DomainError;

    fn try_from(row: StatusChangeRow) -> Result<Self, Self::Error> {
        Ok(StatusChange {
            referral_id: ReferralId::from_uuid(row.referral_id),
            from_status: row
                .from_status
                .as_deref()
                .map(parse_referral_status)
                .transpose()?,
            to_status: parse_referral_status(&row.to_status)?,
            changed_by: UserId::from_uuid(row.changed_by),
            notes: row.notes,
            changed_at: Timestamp::from_datetime(row.changed_at),
        })
    }
}

fn parse_referral_status(s: &str) -> Result<ReferralStatus, DomainError> {
    match s {
        "PENDING" => Ok(ReferralStatus::Pending),
        "CONTACTED" => Ok(ReferralStatus::Contacted),
        "NEGOTIATING" => Ok(ReferralStatus::Negotiating),
        "CLOSED" => Ok(ReferralStatus::Closed),
        "LOST" => Ok(ReferralStatus::Lost),
        "CANCELLED" => Ok(ReferralStatus::Cancelled),
        _ => Err(DomainError::database(format!(
            "Invalid referral status value: {}",
            s
        ))),
    }
}

fn referral_status_to_str(status: ReferralStatus) -> &'static str {
    match status {
        ReferralStatus::Pending => "PENDING",
        ReferralStatus::Contacted => "CONTACTED",
        ReferralStatus::Negotiating => "NEGOTIATING",
        ReferralStatus::Closed => "CLOSED",
        ReferralStatus::Lost => "LOST",
        ReferralStatus::Cancelled => "CANCELLED",
    }
}

fn scope_to_str(scope: ReferralScope) -> &'static str {
    match scope {
        ReferralScope::Given => "given",
        ReferralScope::Received => "received",
        ReferralScope::All => "all",
    }
}

async fn insert_history<'e, E>(executor: E, change: &StatusChange) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO referral_status_history (
            id, referral_id, from_status, to_status, changed_by, notes, changed_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(change.referral_id.as_uuid())
    .bind(change.from_status.map(referral_status_to_str))
    .bind(referral_status_to_str(change.to_status))
    .bind(change.changed_by.as_uuid())
    .bind(&change.notes)
    .bind(change.changed_at.as_datetime())
    .execute(executor)
    .await?;
    Ok(())
}

#[async_trait]
impl ReferralRepository for PostgresReferralRepository {
    async fn save(
        &self,
        referral: &BusinessReferral,
        initial_change: &StatusChange,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to open transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO business_referrals (
                id, referrer_id, referred_to_id, client_name, client_phone, client_email,
                description, estimated_value, status, feedback, closed_value, closed_at,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(referral.id.as_uuid())
        .bind(referral.referrer_id.as_uuid())
        .bind(referral.referred_to_id.as_uuid())
        .bind(&referral.client_name)
        .bind(&referral.client_phone)
        .bind(&referral.client_email)
        .bind(&referral.description)
        .bind(referral.estimated_value)
        .bind(referral_status_to_str(referral.status))
        .bind(&referral.feedback)
        .bind(referral.closed_value)
        .bind(referral.closed_at.map(|t| *t.as_datetime()))
        .bind(referral.created_at.as_datetime())
        .bind(referral.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save referral: {}", e)))?;

        insert_history(&mut *tx, initial_change)
            .await
            .map_err(|e| DomainError::database(format!("Failed to record history: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit referral: {}", e)))?;

        Ok(())
    }

    async fn update(
        &self,
        referral: &BusinessReferral,
        change: &StatusChange,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to open transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE business_referrals SET
                status = $2,
                feedback = $3,
                closed_value = $4,
                closed_at = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(referral.id.as_uuid())
        .bind(referral_status_to_str(referral.status))
        .bind(&referral.feedback)
        .bind(referral.closed_value)
        .bind(referral.closed_at.map(|t| *t.as_datetime()))
        .bind(referral.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update referral: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ReferralNotFound,
                "Referral not found",
            ));
        }

        insert_history(&mut *tx, change)
            .await
            .map_err(|e| DomainError::database(format!("Failed to record history: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit update: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ReferralId) -> Result<Option<BusinessReferral>, DomainError> {
        let row: Option<ReferralRow> = sqlx::query_as(&format!(
            "SELECT {} FROM business_referrals WHERE id = $1",
            REFERRAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find referral: {}", e)))?;

        row.map(BusinessReferral::try_from).transpose()
    }

    async fn list(
        &self,
        member_id: &MemberId,
        filter: &ReferralListFilter,
        page: PageRequest,
    ) -> Result<Page<BusinessReferral>, DomainError> {
        let scope = scope_to_str(filter.scope);
        let status = filter.status.map(referral_status_to_str);
        let search = filter.search.as_deref();

        const WHERE_CLAUSE: &str = "WHERE (($2 = 'given' AND referrer_id = $1) \
               OR ($2 = 'received' AND referred_to_id = $1) \
               OR ($2 = 'all' AND (referrer_id = $1 OR referred_to_id = $1))) \
             AND ($3::text IS NULL OR status = $3) \
             AND ($4::text IS NULL OR client_name ILIKE '%' || $4 || '%')";

        let rows: Vec<ReferralRow> = sqlx::query_as(&format!(
            "SELECT {} FROM business_referrals {} ORDER BY created_at DESC LIMIT $5 OFFSET $6",
            REFERRAL_COLUMNS, WHERE_CLAUSE
        ))
        .bind(member_id.as_uuid())
        .bind(scope)
        .bind(status)
        .bind(search)
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list referrals: {}", e)))?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM business_referrals {}",
            WHERE_CLAUSE
        ))
        .bind(member_id.as_uuid())
        .bind(scope)
        .bind(status)
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count referrals: {}", e)))?;

        let items = rows
            .into_iter()
            .map(BusinessReferral::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total as u64))
    }

    async fn history(&self, id: &ReferralId) -> Result<Vec<StatusChange>, DomainError> {
        let rows: Vec<StatusChangeRow> = sqlx::query_as(
            r#"
            SELECT referral_id, from_status, to_status, changed_by, notes, changed_at
            FROM referral_status_history
            WHERE referral_id = $1
            ORDER BY changed_at DESC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load history: {}", e)))?;

        rows.into_iter().map(StatusChange::try_from).collect()
    }

    async fn statistics(&self, member_id: &MemberId) -> Result<ReferralStatistics, DomainError> {
        #[derive(sqlx::FromRow)]
        struct StatsRow {
            total_given: i64,
            total_received: i64,
            pending_received: i64,
            closed_received: i64,
            total_value_closed: i64,
        }

        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE referrer_id = $1) AS total_given,
                COUNT(*) FILTER (WHERE referred_to_id = $1) AS total_received,
                COUNT(*) FILTER (WHERE referred_to_id = $1 AND status = 'PENDING')
                    AS pending_received,
                COUNT(*) FILTER (WHERE referred_to_id = $1 AND status = 'CLOSED')
                    AS closed_received,
                COALESCE(SUM(closed_value) FILTER
                    (WHERE referred_to_id = $1 AND status = 'CLOSED'), 0)::BIGINT
                    AS total_value_closed
            FROM business_referrals
            WHERE referrer_id = $1 OR referred_to_id = $1
            "#,
        )
        .bind(member_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load statistics: {}", e)))?;

        Ok(ReferralStatistics {
            total_given: row.total_given as u64,
            total_received: row.total_received as u64,
            pending_received: row.pending_received as u64,
            closed_received: row.closed_received as u64,
            total_value_closed: row.total_value_closed,
        })
    }
}
