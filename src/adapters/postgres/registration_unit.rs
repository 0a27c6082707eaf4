//! PostgreSQL implementation of RegistrationUnit.
//!
//! The one place where atomicity is a hard requirement: the credential and
//! the member row are inserted in a single transaction, so a failure at any
//! point rolls both back. Unique-constraint violations are translated into
//! the conflict codes the handlers expect, which also covers two requests
//! racing to redeem the same invite: the `members_intent_id_key` index lets
//! exactly one of them win.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{NewRegistration, RegistrationUnit};

use super::member_repository::member_status_to_str;
use super::user_repository::role_to_str;

/// PostgreSQL implementation of the RegistrationUnit port.
pub struct PostgresRegistrationUnit {
    pool: PgPool,
}

impl PostgresRegistrationUnit {
    /// Creates a new unit backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error, step: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_email_key") | Some("members_email_key") => {
                return DomainError::new(ErrorCode::EmailInUse, "Email already registered");
            }
            Some("members_cpf_key") => {
                return DomainError::new(ErrorCode::CpfInUse, "CPF already registered");
            }
            Some("members_intent_id_key") => {
                return DomainError::new(
                    ErrorCode::TokenAlreadyUsed,
                    "Invite already redeemed",
                );
            }
            _ => {}
        }
    }
    DomainError::database(format!("Failed to {}: {}", step, e))
}

#[async_trait]
impl RegistrationUnit for PostgresRegistrationUnit {
    async fn register(&self, registration: NewRegistration) -> Result<(), DomainError> {
        let NewRegistration { user, member } = registration;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to open transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(role_to_str(user.role))
        .bind(user.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "create credential"))?;

        sqlx::query(
            r#"
            INSERT INTO members (
                id, user_id, intent_id, full_name, email, phone, cpf, birth_date,
                photo_url, company, position, industry, business_description,
                website, linkedin_url,
                address_street, address_number, address_complement,
                address_neighborhood, address_city, address_state, address_zipcode,
                status, membership_start_date, membership_end_date, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
            )
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(member.user_id.as_uuid())
        .bind(member.intent_id.map(|id| *id.as_uuid()))
        .bind(&member.full_name)
        .bind(&member.email)
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
        .bind(member.membership_start_date.as_datetime())
        .bind(member.membership_end_date.map(|t| *t.as_datetime()))
        .bind(member.created_at.as_datetime())
        .bind(member.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, "create member"))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit registration: {}", e)))?;

        Ok(())
    }
}
