//! Store (tenant root) types and settings rules.

use crate::delivery::ZoneConfig;
use crate::error::CommerceError;
use crate::ids::{MerchantId, StoreId};
use crate::money::Currency;
use crate::store::{validate_slug, StoreDirectory, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// A merchant's store. The tenant root every other record hangs off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    /// Unique store identifier.
    pub id: StoreId,
    /// Owning merchant. Must reference a profile with the merchant role.
    pub merchant_id: MerchantId,
    /// Display name.
    pub name: String,
    /// Globally unique URL slug.
    pub slug: String,
    /// Set irrevocably once the slug has been changed.
    pub slug_changed: bool,
    /// Store category (e.g., clothing, electronics).
    pub category: Option<String>,
    /// Delivery-zone configuration, normalized from legacy shapes.
    pub delivery_zones: ZoneConfig,
    /// Subscription tier.
    pub subscription: SubscriptionTier,
    /// Whether the store is active.
    pub active: bool,
    /// Unix timestamp the current plan started.
    pub plan_started_at: Option<i64>,
    /// Unix timestamp the current plan expires.
    pub plan_expires_at: Option<i64>,
    /// Store currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Store {
    /// Create a new store with default zone configuration.
    pub fn new(merchant_id: MerchantId, name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            id: StoreId::generate(),
            merchant_id,
            name: name.into(),
            slug: slug.into(),
            slug_changed: false,
            category: None,
            delivery_zones: ZoneConfig::default(),
            subscription: SubscriptionTier::Free,
            active: true,
            plan_started_at: None,
            plan_expires_at: None,
            currency: Currency::IQD,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the subscription is active at the given time.
    pub fn subscription_active(&self, now: i64) -> bool {
        if !self.active {
            return false;
        }
        match self.plan_expires_at {
            Some(expires) => now < expires,
            None => true,
        }
    }

    /// Change the store slug. Allowed at most once per store.
    ///
    /// Rejects when the slug was already changed, when the new slug equals
    /// the current one, when the slug is malformed, or when another store
    /// already owns it. On success `slug_changed` is set irrevocably.
    pub fn change_slug<D: StoreDirectory>(
        &mut self,
        new_slug: &str,
        directory: &D,
    ) -> Result<(), CommerceError> {
        if self.slug_changed {
            return Err(CommerceError::SlugAlreadyChanged);
        }
        validate_slug(new_slug)?;
        if new_slug == self.slug {
            return Err(CommerceError::Validation(
                "new slug matches the current slug".to_string(),
            ));
        }
        if directory.slug_taken(new_slug, &self.id)? {
            return Err(CommerceError::SlugTaken(new_slug.to_string()));
        }
        self.slug = new_slug.to_string();
        self.slug_changed = true;
        self.updated_at = current_timestamp();
        Ok(())
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
