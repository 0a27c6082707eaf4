//! Login credential entity.
//!
//! A credential is created exactly once per member, inside the same atomic
//! unit as the member profile (see the `RegistrationUnit` port). Admin
//! credentials are provisioned out-of-band (seed data).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Role attached to a login credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Member,
}

/// A login credential: email plus password hash.
///
/// The `password_hash` field holds a PHC-format Argon2 hash, never a plain
/// password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a member-role credential with an already-hashed password.
    pub fn new_member(id: UserId, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            id,
            email: email.into(),
            password_hash,
            role: UserRole::Member,
            created_at: Timestamp::now(),
        }
    }
}
