//! PostgreSQL implementation of IntentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, IntentId, Page, PageRequest, SortOrder, Timestamp, UserId,
};
use crate::domain::intent::{IntentStatus, MembershipIntent};
use crate::ports::{IntentListFilter, IntentRepository, IntentSortField};

/// PostgreSQL implementation of the IntentRepository port.
///
/// Uniqueness is enforced by two indexes: a unique index on `invite_token`
/// and a partial unique index on `email` over active statuses.
pub struct PostgresIntentRepository {
    pool: PgPool,
}

impl PostgresIntentRepository {
    /// Creates a new repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const INTENT_COLUMNS: &str = "id, full_name, email, phone, company, industry, motivation, \
     status, reviewed_by, reviewed_at, review_notes, rejection_reason, \
     invite_token, token_expires_at, created_at, updated_at";

/// Database row representation of a membership intent.
#[derive(Debug, sqlx::FromRow)]
struct IntentRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    industry: Option<String>,
    motivation: String,
    status: String,
    reviewed_by: Option<Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
    review_notes: Option<String>,
    rejection_reason: Option<String>,
    invite_token: Option<String>,
    token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IntentRow> for MembershipIntent {
    type Error = DomainError;

    fn try_from(row: IntentRow) -> Result<Self, Self::Error> {
        Ok(MembershipIntent {
            id: IntentId::from_uuid(row.id),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            industry: row.industry,
            motivation: row.motivation,
            status: parse_intent_status(&row.status)?,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
            reviewed_at: row.reviewed_at.map(Timestamp::from_datetime),
            review_notes: row.review_notes,
            rejection_reason: row.rejection_reason,
            invite_token: row.invite_token,
            token_expires_at: row.token_expires_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_intent_status(s: &str) -> Result<IntentStatus, DomainError> {
    match s {
        "PENDING" => Ok(IntentStatus::Pending),
        "APPROVED" => Ok(IntentStatus::Approved),
        "REJECTED" => Ok(IntentStatus::Rejected),
        _ => Err(DomainError::database(format!(
            "Invalid intent status value: {}",
            s
        ))),
    }
}

fn intent_status_to_str(status: IntentStatus) -> &'static str {
    match status {
        IntentStatus::Pending => "PENDING",
        IntentStatus::Approved => "APPROVED",
        IntentStatus::Rejected => "REJECTED",
    }
}

fn order_by_clause(sort: IntentSortField, order: SortOrder) -> &'static str {
    match (sort, order) {
        (IntentSortField::CreatedAt, SortOrder::Desc) => "ORDER BY created_at DESC",
        (IntentSortField::CreatedAt, SortOrder::Asc) => "ORDER BY created_at ASC",
        (IntentSortField::FullName, SortOrder::Desc) => "ORDER BY full_name DESC",
        (IntentSortField::FullName, SortOrder::Asc) => "ORDER BY full_name ASC",
    }
}

#[async_trait]
impl IntentRepository for PostgresIntentRepository {
    async fn save(&self, intent: &MembershipIntent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO membership_intents (
                id, full_name, email, phone, company, industry, motivation,
                status, reviewed_by, reviewed_at, review_notes, rejection_reason,
                invite_token, token_expires_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(intent.id.as_uuid())
        .bind(&intent.full_name)
        .bind(&intent.email)
        .bind(&intent.phone)
        .bind(&intent.company)
        .bind(&intent.industry)
        .bind(&intent.motivation)
        .bind(intent_status_to_str(intent.status))
        .bind(intent.reviewed_by.map(|id| *id.as_uuid()))
        .bind(intent.reviewed_at.map(|t| *t.as_datetime()))
        .bind(&intent.review_notes)
        .bind(&intent.rejection_reason)
        .bind(&intent.invite_token)
        .bind(intent.token_expires_at.map(|t| *t.as_datetime()))
        .bind(intent.created_at.as_datetime())
        .bind(intent.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("membership_intents_active_email_key") {
                    return DomainError::new(
                        ErrorCode::ActiveIntentExists,
                        "An active membership intent already exists for this email",
                    );
                }
            }
            DomainError::database(format!("Failed to save intent: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, intent: &MembershipIntent) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE membership_intents SET
                status = $2,
                reviewed_by = $3,
                reviewed_at = $4,
                review_notes = $5,
                rejection_reason = $6,
                invite_token = $7,
                token_expires_at = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(intent.id.as_uuid())
        .bind(intent_status_to_str(intent.status))
        .bind(intent.reviewed_by.map(|id| *id.as_uuid()))
        .bind(intent.reviewed_at.map(|t| *t.as_datetime()))
        .bind(&intent.review_notes)
        .bind(&intent.rejection_reason)
        .bind(&intent.invite_token)
        .bind(intent.token_expires_at.map(|t| *t.as_datetime()))
        .bind(intent.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update intent: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::IntentNotFound,
                "Membership intent not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &IntentId) -> Result<Option<MembershipIntent>, DomainError> {
        let row: Option<IntentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_intents WHERE id = $1",
            INTENT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find intent: {}", e)))?;

        row.map(MembershipIntent::try_from).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<MembershipIntent>, DomainError> {
        let row: Option<IntentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_intents WHERE invite_token = $1",
            INTENT_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find intent by token: {}", e)))?;

        row.map(MembershipIntent::try_from).transpose()
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<MembershipIntent>, DomainError> {
        let row: Option<IntentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_intents \
             WHERE email = $1 AND status IN ('PENDING', 'APPROVED')",
            INTENT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find active intent: {}", e)))?;

        row.map(MembershipIntent::try_from).transpose()
    }

    async fn list(
        &self,
        filter: &IntentListFilter,
        page: PageRequest,
    ) -> Result<Page<MembershipIntent>, DomainError> {
        let status = filter.status.map(intent_status_to_str);
        let search = filter.search.as_deref();

        const WHERE_CLAUSE: &str = "WHERE ($1::text IS NULL OR status = $1) \
             AND ($2::text IS NULL \
                  OR full_name ILIKE '%' || $2 || '%' \
                  OR email ILIKE '%' || $2 || '%' \
                  OR company ILIKE '%' || $2 || '%')";

        let rows: Vec<IntentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM membership_intents {} {} LIMIT $3 OFFSET $4",
            INTENT_COLUMNS,
            WHERE_CLAUSE,
            order_by_clause(filter.sort, filter.order),
        ))
        .bind(status)
        .bind(search)
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list intents: {}", e)))?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM membership_intents {}",
            WHERE_CLAUSE
        ))
        .bind(status)
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count intents: {}", e)))?;

        let items = rows
            .into_iter()
            .map(MembershipIntent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_intent_status_accepts_wire_values() {
        assert_eq!(parse_intent_status("PENDING").unwrap(), IntentStatus::Pending);
        assert_eq!(parse_intent_status("APPROVED").unwrap(), IntentStatus::Approved);
        assert_eq!(parse_intent_status("REJECTED").unwrap(), IntentStatus::Rejected);
    }

    #[test]
    fn parse_intent_status_rejects_unknown_values() {
        assert!(parse_intent_status("pending").is_err());
        assert!(parse_intent_status("").is_err());
    }

    #[test]
    fn status_roundtrips_through_strings() {
        for status in [
            IntentStatus::Pending,
            IntentStatus::Approved,
            IntentStatus::Rejected,
        ] {
            assert_eq!(
                parse_intent_status(intent_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn order_by_clause_covers_all_combinations() {
        assert_eq!(
            order_by_clause(IntentSortField::CreatedAt, SortOrder::Desc),
            "ORDER BY created_at DESC"
        );
        assert_eq!(
            order_by_clause(IntentSortField::FullName, SortOrder::Asc),
            "ORDER BY full_name ASC"
        );
    }
}
