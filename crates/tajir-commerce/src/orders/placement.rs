//! Pricing and order validation engine.
//!
//! Carts arrive from the public storefront and are untrusted end to end.
//! Every gate here fails closed: unit prices and item names are
//! recomputed from the catalog, the delivery fee from the store's zone
//! configuration, and the whole order is rejected wholesale when any
//! referenced product or the delivery city cannot be resolved.

use crate::catalog::ProductCatalog;
use crate::error::CommerceError;
use crate::events::OrderEventSink;
use crate::ids::{OrderId, ProductId, StoreId};
use crate::money::Money;
use crate::orders::{CustomerInfo, Order, OrderItem, OrderRepository, OrderStatus};
use crate::store::StoreDirectory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::error;

/// Bounds on customer info fields.
pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const PHONE_MIN_LEN: usize = 8;
pub const PHONE_MAX_LEN: usize = 20;
pub const CITY_MIN_LEN: usize = 2;
pub const LANDMARK_MAX_LEN: usize = 500;
pub const NOTES_MAX_LEN: usize = 1000;

/// Bounds on line items.
pub const QUANTITY_MIN: i64 = 1;
pub const QUANTITY_MAX: i64 = 100;

/// Check a phone number: optional leading `+`, then digits, spaces and
/// hyphens only, 8 to 20 characters overall.
pub fn valid_phone(phone: &str) -> bool {
    if phone.len() < PHONE_MIN_LEN || phone.len() > PHONE_MAX_LEN {
        return false;
    }
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
}

/// An untrusted cart line as submitted by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderItem {
    /// Product id.
    pub id: ProductId,
    /// Requested quantity.
    pub quantity: i64,
    /// Variant selections chosen by the customer.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selections: BTreeMap<String, String>,
    /// Price as displayed to the client. Accepted for wire compatibility
    /// and then ignored; the catalog price is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

/// An untrusted order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Target store.
    pub store_id: StoreId,
    /// Customer contact details.
    pub customer_info: CustomerInfo,
    /// Cart lines.
    pub items: Vec<PlaceOrderItem>,
}

/// Validate customer info bounds.
pub fn validate_customer_info(info: &CustomerInfo) -> Result<(), CommerceError> {
    let name = info.name.trim();
    if name.chars().count() < NAME_MIN_LEN || name.chars().count() > NAME_MAX_LEN {
        return Err(CommerceError::Validation(
            "customer name must be 2 to 100 characters".to_string(),
        ));
    }
    if !valid_phone(info.phone.trim()) {
        return Err(CommerceError::Validation(
            "phone number must be 8 to 20 characters of digits, spaces and hyphens".to_string(),
        ));
    }
    if info.city.trim().chars().count() < CITY_MIN_LEN {
        return Err(CommerceError::Validation(
            "delivery city is required".to_string(),
        ));
    }
    if let Some(landmark) = &info.landmark {
        if landmark.chars().count() > LANDMARK_MAX_LEN {
            return Err(CommerceError::Validation(
                "landmark must be at most 500 characters".to_string(),
            ));
        }
    }
    if let Some(notes) = &info.notes {
        if notes.chars().count() > NOTES_MAX_LEN {
            return Err(CommerceError::Validation(
                "notes must be at most 1000 characters".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate cart line bounds.
pub fn validate_items(items: &[PlaceOrderItem]) -> Result<(), CommerceError> {
    if items.is_empty() {
        return Err(CommerceError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }
    for item in items {
        if item.quantity < QUANTITY_MIN || item.quantity > QUANTITY_MAX {
            return Err(CommerceError::Validation(format!(
                "quantity must be between {QUANTITY_MIN} and {QUANTITY_MAX}"
            )));
        }
    }
    Ok(())
}

/// Engine that validates, prices and persists incoming orders.
pub struct OrderPlacement<'a, C, R, S, E>
where
    C: ProductCatalog,
    R: OrderRepository,
    S: StoreDirectory,
    E: OrderEventSink,
{
    catalog: &'a C,
    orders: &'a R,
    stores: &'a S,
    events: &'a E,
}

impl<'a, C, R, S, E> OrderPlacement<'a, C, R, S, E>
where
    C: ProductCatalog,
    R: OrderRepository,
    S: StoreDirectory,
    E: OrderEventSink,
{
    pub fn new(catalog: &'a C, orders: &'a R, stores: &'a S, events: &'a E) -> Self {
        Self {
            catalog,
            orders,
            stores,
            events,
        }
    }

    /// Place an order. Returns the persisted order's id.
    ///
    /// Gates, in order, each fail-closed:
    /// 1. structural validation of customer info and items,
    /// 2. the target store must exist,
    /// 3. every referenced product must exist in the store's catalog and
    ///    be purchasable — no partial acceptance,
    /// 4. the delivery city must resolve to a fee,
    /// 5. unit prices and names are recomputed from the catalog,
    /// 6. exactly one order row is inserted with status `pending`.
    pub fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderId, CommerceError> {
        validate_customer_info(&request.customer_info)?;
        validate_items(&request.items)?;

        let store = self
            .stores
            .store(&request.store_id)?
            .ok_or_else(|| CommerceError::StoreNotFound(request.store_id.to_string()))?;

        let ids: Vec<ProductId> = request.items.iter().map(|i| i.id.clone()).collect();
        let products = self.catalog.products_by_ids(&store.id, &ids)?;
        let by_id: HashMap<&ProductId, &crate::catalog::Product> =
            products.iter().map(|p| (&p.id, p)).collect();

        let fee = store
            .delivery_zones
            .resolve_fee(&request.customer_info.city, store.currency)?;

        let mut items = Vec::with_capacity(request.items.len());
        let mut subtotal = Money::zero(store.currency);
        for line in &request.items {
            let product = by_id
                .get(&line.id)
                .filter(|p| p.is_purchasable())
                .ok_or_else(|| CommerceError::ProductUnavailable(line.id.to_string()))?;

            let line_total = product
                .price
                .checked_mul(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or(CommerceError::Overflow)?;

            items.push(OrderItem {
                id: product.id.clone(),
                quantity: line.quantity,
                name: product.name.clone(),
                price: product.price,
                selections: line.selections.clone(),
            });
        }

        let total = subtotal.checked_add(fee).ok_or(CommerceError::Overflow)?;
        let now = current_timestamp();
        let order = Order {
            id: OrderId::generate(),
            store_id: store.id.clone(),
            customer_info: CustomerInfo {
                name: request.customer_info.name.trim().to_string(),
                phone: request.customer_info.phone.trim().to_string(),
                city: request.customer_info.city.trim().to_string(),
                landmark: request.customer_info.landmark.clone(),
                notes: request.customer_info.notes.clone(),
            },
            items,
            delivery_fee: fee,
            total_price: total,
            governorate: request.customer_info.city.trim().to_string(),
            status: OrderStatus::Pending,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        if let Err(e) = self.orders.insert(&order) {
            error!(store = %store.id, error = %e, "failed to persist order");
            return Err(e);
        }

        self.events.order_placed(&store.id, &order.id);

        Ok(order.id)
    }
}

/// Wire response for order placement:
/// `{ success: true, order_id }` or `{ success: false, error }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlacementResponse {
    /// Convert an engine result, leaking no internal failure detail.
    pub fn from_result(result: &Result<OrderId, CommerceError>) -> Self {
        match result {
            Ok(order_id) => Self {
                success: true,
                order_id: Some(order_id.clone()),
                error: None,
            },
            Err(e) => Self {
                success: false,
                order_id: None,
                error: Some(e.public_message()),
            },
        }
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

    fn info() -> CustomerInfo {
        CustomerInfo {
            name: "علي حسن".to_string(),
            phone: "0770 123-4567".to_string(),
            city: "بغداد".to_string(),
            landmark: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_phone() {
        assert!(valid_phone("07701234567"));
        assert!(valid_phone("+964 770 123 4567"));
        assert!(valid_phone("0770-123-4567"));
        assert!(!valid_phone("1234567"));
        assert!(!valid_phone("0770123456x"));
        assert!(!valid_phone("077+1234567"));
    }

    #[test]
    fn test_customer_info_bounds() {
        assert!(validate_customer_info(&info()).is_ok());

        let mut short_name = info();
        short_name.name = "ع".to_string();
        assert!(validate_customer_info(&short_name).is_err());

        let mut bad_city = info();
        bad_city.city = " ".to_string();
        assert!(validate_customer_info(&bad_city).is_err());

        let mut long_notes = info();
        long_notes.notes = Some("x".repeat(NOTES_MAX_LEN + 1));
        assert!(validate_customer_info(&long_notes).is_err());
    }

    #[test]
    fn test_item_bounds() {
        assert!(validate_items(&[]).is_err());

        let item = |q| PlaceOrderItem {
            id: ProductId::new("p-1"),
            quantity: q,
            selections: BTreeMap::new(),
            price: None,
        };
        assert!(validate_items(&[item(1)]).is_ok());
        assert!(validate_items(&[item(100)]).is_ok());
        assert!(validate_items(&[item(0)]).is_err());
        assert!(validate_items(&[item(101)]).is_err());
    }

    #[test]
    fn test_response_shape() {
        let ok = PlacementResponse::from_result(&Ok(OrderId::new("o-1")));
        assert!(ok.success);
        assert_eq!(ok.order_id, Some(OrderId::new("o-1")));

        let err = PlacementResponse::from_result(&Err(CommerceError::Dependency(
            "insert failed: constraint xyz".to_string(),
        )));
        assert!(!err.success);
        assert!(!err.error.as_deref().unwrap_or("").contains("constraint"));
    }
}
