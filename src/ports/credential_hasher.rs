//! Credential hashing port.

use crate::domain::foundation::DomainError;

/// Salted password hashing behind a trait so handlers and tests never touch
/// the concrete algorithm.
pub trait CredentialHasher: Send + Sync {
    /// Hashes a plain password into PHC string format.
    fn hash(&self, plain: &str) -> Result<String, DomainError>;

    /// Verifies a plain password against a stored PHC hash.
    fn verify(&self, plain: &str, phc: &str) -> Result<bool, DomainError>;
}
