//! Login credential repository port (read side).
//!
//! Credential *creation* happens only inside the
//! [`RegistrationUnit`](crate::ports::RegistrationUnit); this port covers the
//! lookups the registration preconditions need.

use async_trait::async_trait;

use crate::domain::credential::User;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for login credential lookups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a credential by email. Returns `None` if absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a credential by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
