//! Provisioning errors.

use tajir_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur while provisioning a merchant.
#[derive(Error, Debug)]
pub enum ProvisioningError {
    /// Caller is not a super admin. Carries no detail on purpose.
    #[error("not authorized")]
    NotAuthorized,

    /// Malformed or out-of-range registration payload.
    #[error("validation error: {0}")]
    Validation(String),

    /// Another store already owns the requested slug. Distinct from
    /// generic persistence failures so the admin sees a usable message.
    #[error("slug already taken: {0}")]
    SlugTaken(String),

    /// The identity service failed.
    #[error("identity service error: {0}")]
    Identity(String),

    /// The data store or another dependency failed.
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl ProvisioningError {
    /// Check if this error was caused by bad caller input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ProvisioningError::Validation(_) | ProvisioningError::SlugTaken(_)
        )
    }

    /// Message safe to surface to the admin UI.
    pub fn public_message(&self) -> String {
        match self {
            ProvisioningError::Identity(_) | ProvisioningError::Dependency(_) => {
                "something went wrong, please try again".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<CommerceError> for ProvisioningError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::Validation(msg) => ProvisioningError::Validation(msg),
            CommerceError::SlugTaken(slug) => ProvisioningError::SlugTaken(slug),
            CommerceError::NotAuthorized => ProvisioningError::NotAuthorized,
            other => ProvisioningError::Dependency(other.to_string()),
        }
    }
}
