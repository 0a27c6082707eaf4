//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, IntentId, MemberId, Timestamp, UserId,
};
use crate::domain::member::{Address, Member, MemberStatus};
use crate::ports::MemberRepository;

/// PostgreSQL implementation of the MemberRepository port.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new repository backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) const MEMBER_COLUMNS: &str = "id, user_id, intent_id, full_name, email, phone, cpf, birth_date, \
     photo_url, company, position, industry, business_description, website, linkedin_url, \
     address_street, address_number, address_complement, address_neighborhood, \
     address_city, address_state, address_zipcode, \
     status, membership_start_date, membership_end_date, created_at, updated_at";

/// Database row representation of a member.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MemberRow {
    id: Uuid,
    user_id: Uuid,
    intent_id: Option<Uuid>,
    full_name: String,
    email: String,
    phone: Option<String>,
    cpf: Option<String>,
    birth_date: Option<NaiveDate>,
    photo_url: Option<String>,
    company: Option<String>,
    position: Option<String>,
    industry: Option<String>,
    business_description: Option<String>,
    website: Option<String>,
    linkedin_url: Option<String>,
    address_street: Option<String>,
    address_number: Option<String>,
    address_complement: Option<String>,
    address_neighborhood: Option<String>,
    address_city: Option<String>,
    address_state: Option<String>,
    address_zipcode: Option<String>,
    status: String,
    membership_start_date: DateTime<Utc>,
    membership_end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: MemberId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            intent_id: row.intent_id.map(IntentId::from_uuid),
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            cpf: row.cpf,
            birth_date: row.birth_date,
            photo_url: row.photo_url,
            company: row.company,
            position: row.position,
            industry: row.industry,
            business_description: row.business_description,
            website: row.website,
            linkedin_url: row.linkedin_url,
            address: Address {
                street: row.address_street,
                number: row.address_number,
                complement: row.address_complement,
                neighborhood: row.address_neighborhood,
                city: row.address_city,
                state: row.address_state,
                zipcode: row.address_zipcode,
            },
            status: parse_member_status(&row.status)?,
            membership_start_date: Timestamp::from_datetime(row.membership_start_date),
            membership_end_date: row.membership_end_date.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) fn parse_member_status(s: &str) -> Result<MemberStatus, DomainError> {
    match s {
        "ACTIVE" => Ok(MemberStatus::Active),
        "INACTIVE" => Ok(MemberStatus::Inactive),
        "SUSPENDED" => Ok(MemberStatus::Suspended),
        _ => Err(DomainError::database(format!(
            "Invalid member status value: {}",
            s
        ))),
    }
}

pub(super) fn member_status_to_str(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Active => "ACTIVE",
        MemberStatus::Inactive => "INACTIVE",
        MemberStatus::Suspended => "SUSPENDED",
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn update(&self, member: &Member) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE members SET
                full_name = $2,
                phone = $3,
                cpf = $4,
                birth_date = $5,
                photo_url = $6,
                company = $7,
                position = $8,
                industry = $9,
                business_description = $10,
                website = $11,
                linkedin_url = $12,
                address_street = $13,
                address_number = $14,
                address_complement = $15,
                address_neighborhood = $16,
                address_city = $17,
                address_state = $18,
                address_zipcode = $19,
                status = $20,
                membership_end_date = $21,
                updated_at = $22
            WHERE id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.full_name)
        .bind(&member.phone)
        .bind(&member.cpf)
        .bind(member.birth_date)
        .bind(&member.photo_url)
        .bind(&member.company)
        .bind(&member.position)
        .bind(&member.industry)
        .bind(&member.business_description)
        .bind(&member.website)
        .bind(&member.linkedin_url)
        .bind(&member.address.street)
        .bind(&member.address.number)
        .bind(&member.address.complement)
        .bind(&member.address.neighborhood)
        .bind(&member.address.city)
        .bind(&member.address.state)
        .bind(&member.address.zipcode)
        .bind(member_status_to_str(member.status))
        .bind(member.membership_end_date.map(|t| *t.as_datetime()))
        .bind(member.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("members_cpf_key") {
                    return DomainError::new(ErrorCode::CpfInUse, "CPF already registered");
                }
            }
            DomainError::database(format!("Failed to update member: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::MemberNotFound, "Member not found"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE id = $1",
            MEMBER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find member: {}", e)))?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE email = $1",
            MEMBER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find member by email: {}", e)))?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE cpf = $1",
            MEMBER_COLUMNS
        ))
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find member by cpf: {}", e)))?;

        row.map(Member::try_from).transpose()
    }

    async fn find_by_intent(&self, intent_id: &IntentId) -> Result<Option<Member>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM members WHERE intent_id = $1",
            MEMBER_COLUMNS
        ))
        .bind(intent_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find member by intent: {}", e)))?;

        row.map(Member::try_from).transpose()
    }
}
