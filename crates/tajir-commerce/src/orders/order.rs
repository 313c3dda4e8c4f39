//! Order record types.

use crate::ids::{OrderId, ProductId, StoreId};
use crate::money::Money;
use crate::orders::OrderStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Customer contact details captured with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Delivery city.
    pub city: String,
    /// Nearby landmark for the courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A line item on a persisted order.
///
/// `name` and `price` are derived server-side from the catalog at
/// placement time, never taken from the submitting client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product id.
    pub id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Product name at placement time.
    pub name: String,
    /// Unit price at placement time.
    pub price: Money,
    /// Human-readable variant selections (e.g., "Size" -> "M").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selections: BTreeMap<String, String>,
}

impl OrderItem {
    /// Line total (`price * quantity`). `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_mul(self.quantity)
    }
}

/// A persisted order.
///
/// Field names match the persisted record shape: `customer_info`,
/// `items`, `total_price`, `delivery_fee`, `governorate`, `status`,
/// `cancellation_reason`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Owning store.
    pub store_id: StoreId,
    /// Customer contact details.
    pub customer_info: CustomerInfo,
    /// Line items with server-derived names and prices.
    pub items: Vec<OrderItem>,
    /// Delivery fee resolved from the store's zone configuration.
    pub delivery_fee: Money,
    /// Item subtotal plus delivery fee.
    pub total_price: Money,
    /// Delivery governorate/city.
    pub governorate: String,
    /// Current status.
    pub status: OrderStatus,
    /// Free-text reason recorded with cancellation or return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
    /// Soft-delete marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
}

impl Order {
    /// Sum of line totals. `None` on overflow or currency mismatch.
    pub fn item_subtotal(&self) -> Option<Money> {
        let mut subtotal = Money::zero(self.total_price.currency);
        for item in &self.items {
            subtotal = subtotal.checked_add(item.line_total()?)?;
        }
        Some(subtotal)
    }

    /// Check the pricing invariant:
    /// `total_price == sum(price * quantity) + delivery_fee`.
    pub fn totals_consistent(&self) -> bool {
        self.item_subtotal()
            .and_then(|subtotal| subtotal.checked_add(self.delivery_fee))
            .map(|total| total == self.total_price)
            .unwrap_or(false)
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the order is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn order() -> Order {
        Order {
            id: OrderId::new("o-1"),
            store_id: StoreId::new("s-1"),
            customer_info: CustomerInfo {
                name: "علي حسن".to_string(),
                phone: "07701234567".to_string(),
                city: "بغداد".to_string(),
                landmark: None,
                notes: None,
            },
            items: vec![OrderItem {
                id: ProductId::new("p-1"),
                quantity: 2,
                name: "Shirt".to_string(),
                price: Money::new(25000, Currency::IQD),
                selections: BTreeMap::new(),
            }],
            delivery_fee: Money::new(5000, Currency::IQD),
            total_price: Money::new(55000, Currency::IQD),
            governorate: "بغداد".to_string(),
            status: OrderStatus::Pending,
            cancellation_reason: None,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
        }
    }

    #[test]
    fn test_totals_consistent() {
        let mut o = order();
        assert!(o.totals_consistent());
        o.total_price = Money::new(50000, Currency::IQD);
        assert!(!o.totals_consistent());
    }

    #[test]
    fn test_persisted_field_names() {
        let json = serde_json::to_value(order()).unwrap();
        assert!(json.get("customer_info").is_some());
        assert!(json.get("total_price").is_some());
        assert!(json.get("delivery_fee").is_some());
        assert!(json.get("governorate").is_some());
        assert_eq!(json["status"], "pending");
        let item = &json["items"][0];
        assert!(item.get("id").is_some());
        assert!(item.get("quantity").is_some());
        assert!(item.get("name").is_some());
        assert!(item.get("price").is_some());
    }
}
