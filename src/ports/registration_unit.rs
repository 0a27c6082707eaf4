//! Atomic registration unit port.
//!
//! Redeeming an invite must create the login credential and the member
//! profile as one unit: both succeed or both roll back. A crash or
//! validation failure mid-way must never leave an orphan credential or a
//! phantom member - this is the one genuine atomicity requirement in the
//! system, and the reason credential/member creation does not go through the
//! ordinary repositories.

use async_trait::async_trait;

use crate::domain::credential::User;
use crate::domain::foundation::DomainError;
use crate::domain::member::Member;

/// The credential and profile to provision together.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub user: User,
    pub member: Member,
}

/// Port wrapping credential + member creation in one atomic unit.
#[async_trait]
pub trait RegistrationUnit: Send + Sync {
    /// Persist the credential and the member profile atomically.
    ///
    /// # Errors
    ///
    /// - `EmailInUse` / `CpfInUse` / `TokenAlreadyUsed` when a uniqueness
    ///   constraint races in between the handler's checks and the insert
    /// - `DatabaseError` on any other persistence failure
    ///
    /// On any error, neither row is persisted.
    async fn register(&self, registration: NewRegistration) -> Result<(), DomainError>;
}
