//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration (admin API key)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Static API key required by the admin endpoints
    pub admin_api_key: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.admin_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN_API_KEY"));
        }
        if self.admin_api_key.len() < 16 {
            return Err(ValidationError::WeakAdminApiKey);
        }
        Ok(())
    }
}
