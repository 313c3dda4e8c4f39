//! Product types.

use crate::ids::{ProductId, SectionId, StoreId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Stock figure reported for an available product.
///
/// Stock is a catalog-only availability flag, not a depletable counter:
/// 999 when available, 0 when not.
pub const MOCK_STOCK_AVAILABLE: i64 = 999;

/// How an out-of-stock product is presented on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OutOfStockPolicy {
    /// Hide the product entirely.
    #[default]
    Hide,
    /// Keep the product visible with an out-of-stock badge.
    ShowBadge,
}

impl OutOfStockPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutOfStockPolicy::Hide => "hide",
            OutOfStockPolicy::ShowBadge => "show_badge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hide" => Some(OutOfStockPolicy::Hide),
            "show_badge" | "show-badge" => Some(OutOfStockPolicy::ShowBadge),
            _ => None,
        }
    }
}

/// A product in a store's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Owning store.
    pub store_id: StoreId,
    /// Section this product belongs to, if any.
    pub section_id: Option<SectionId>,
    /// Product name.
    pub name: String,
    /// Base price. Variant combinations may override it.
    pub price: Money,
    /// Availability flag. Stands in for real inventory counts.
    pub available: bool,
    /// Presentation policy when unavailable.
    pub out_of_stock_policy: OutOfStockPolicy,
    /// Variant configuration blob (options and combinations), if any.
    pub attributes: Option<serde_json::Value>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new available product.
    pub fn new(store_id: StoreId, name: impl Into<String>, price: Money) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            store_id,
            section_id: None,
            name: name.into(),
            price,
            available: true,
            out_of_stock_policy: OutOfStockPolicy::default(),
            attributes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mock stock figure: 999 when available, 0 when not.
    pub fn stock(&self) -> i64 {
        if self.available {
            MOCK_STOCK_AVAILABLE
        } else {
            0
        }
    }

    /// Check if the product can be ordered.
    pub fn is_purchasable(&self) -> bool {
        self.available
    }

    /// Check if the product should appear on the storefront.
    pub fn is_visible(&self) -> bool {
        self.available || self.out_of_stock_policy == OutOfStockPolicy::ShowBadge
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_mock_stock() {
        let mut p = Product::new(
            StoreId::new("s-1"),
            "Shirt",
            Money::new(25000, Currency::IQD),
        );
        assert_eq!(p.stock(), MOCK_STOCK_AVAILABLE);
        p.available = false;
        assert_eq!(p.stock(), 0);
    }

    #[test]
    fn test_visibility_policy() {
        let mut p = Product::new(
            StoreId::new("s-1"),
            "Shirt",
            Money::new(25000, Currency::IQD),
        );
        p.available = false;
        assert!(!p.is_visible());
        p.out_of_stock_policy = OutOfStockPolicy::ShowBadge;
        assert!(p.is_visible());
        assert!(!p.is_purchasable());
    }
}
