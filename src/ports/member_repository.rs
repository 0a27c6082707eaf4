//! Member repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, IntentId, MemberId};
use crate::domain::member::Member;

/// Repository port for Member aggregate persistence.
///
/// Member *creation* is excluded on purpose: new members come into existence
/// only through the [`RegistrationUnit`](crate::ports::RegistrationUnit),
/// which persists the credential and the profile in one atomic unit.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persist profile/status changes of an existing member.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the member does not exist
    /// - `CpfInUse` if a CPF change races into a collision
    /// - `DatabaseError` on persistence failure
    async fn update(&self, member: &Member) -> Result<(), DomainError>;

    /// Find a member by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Find a member by email. Returns `None` if absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, DomainError>;

    /// Find a member by CPF. Returns `None` if absent.
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Member>, DomainError>;

    /// Find the member created from an intent, if the invite was redeemed.
    ///
    /// This is the single-use-token check: a `Some` result means the invite
    /// has been consumed.
    async fn find_by_intent(&self, intent_id: &IntentId) -> Result<Option<Member>, DomainError>;
}
