//! Store tenancy: the store record, slug rules, and subscription plans.

mod plan;
mod store;

pub use plan::{
    PlanFeatures, PlanLimits, SubscriptionDuration, SubscriptionPlan, SubscriptionTier, UNLIMITED,
};
pub use store::Store;

use crate::error::CommerceError;
use crate::ids::{MerchantId, StoreId};

/// Minimum slug length.
pub const SLUG_MIN_LEN: usize = 3;
/// Maximum slug length.
pub const SLUG_MAX_LEN: usize = 50;

/// Validate a store slug: lowercase alphanumeric plus hyphen, 3..50 chars.
pub fn validate_slug(slug: &str) -> Result<(), CommerceError> {
    if slug.len() < SLUG_MIN_LEN || slug.len() > SLUG_MAX_LEN {
        return Err(CommerceError::Validation(format!(
            "slug must be {SLUG_MIN_LEN} to {SLUG_MAX_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CommerceError::Validation(
            "slug may only contain lowercase letters, digits and hyphens".to_string(),
        ));
    }
    Ok(())
}

/// Read access to persisted stores.
///
/// Backed by the relational store in production; in-memory fakes in tests.
pub trait StoreDirectory {
    /// Load a store by id.
    fn store(&self, id: &StoreId) -> Result<Option<Store>, CommerceError>;

    /// Load the store owned by a merchant, if any.
    fn store_for_merchant(&self, merchant: &MerchantId)
        -> Result<Option<Store>, CommerceError>;

    /// Check whether another store already owns a slug.
    fn slug_taken(&self, slug: &str, exclude: &StoreId) -> Result<bool, CommerceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("my-store-7").is_ok());
        assert!(validate_slug("ab").is_err());
        assert!(validate_slug("My-Store").is_err());
        assert!(validate_slug("store_name").is_err());
        assert!(validate_slug(&"a".repeat(51)).is_err());
    }
}
