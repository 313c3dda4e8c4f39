//! End-to-end order lifecycle: placement through status transitions,
//! against in-memory implementations of the storage ports.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use tajir_commerce::prelude::*;

#[derive(Default)]
struct InMemoryCatalog {
    products: Vec<Product>,
}

impl ProductCatalog for InMemoryCatalog {
    fn products_by_ids(
        &self,
        store: &StoreId,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, CommerceError> {
        Ok(self
            .products
            .iter()
            .filter(|p| &p.store_id == store && ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct InMemoryOrders {
    rows: RefCell<HashMap<OrderId, Order>>,
}

impl OrderRepository for InMemoryOrders {
    fn insert(&self, order: &Order) -> Result<(), CommerceError> {
        self.rows
            .borrow_mut()
            .insert(order.id.clone(), order.clone());
        Ok(())
    }

    fn order(&self, id: &OrderId) -> Result<Option<Order>, CommerceError> {
        Ok(self.rows.borrow().get(id).cloned())
    }

    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        reason: Option<String>,
    ) -> Result<(), CommerceError> {
        let mut rows = self.rows.borrow_mut();
        let order = rows
            .get_mut(id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))?;
        order.status = status;
        order.cancellation_reason = reason;
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryStores {
    stores: Vec<Store>,
}

impl StoreDirectory for InMemoryStores {
    fn store(&self, id: &StoreId) -> Result<Option<Store>, CommerceError> {
        Ok(self.stores.iter().find(|s| &s.id == id).cloned())
    }

    fn store_for_merchant(&self, merchant: &MerchantId) -> Result<Option<Store>, CommerceError> {
        Ok(self
            .stores
            .iter()
            .find(|s| &s.merchant_id == merchant)
            .cloned())
    }

    fn slug_taken(&self, slug: &str, exclude: &StoreId) -> Result<bool, CommerceError> {
        Ok(self
            .stores
            .iter()
            .any(|s| s.slug == slug && &s.id != exclude))
    }
}

#[derive(Default)]
struct RecordingEvents {
    placed: RefCell<Vec<OrderId>>,
    changed: RefCell<Vec<(OrderId, OrderStatus, OrderStatus)>>,
}

impl OrderEventSink for RecordingEvents {
    fn order_placed(&self, _store: &StoreId, order: &OrderId) {
        self.placed.borrow_mut().push(order.clone());
    }

    fn status_changed(
        &self,
        _store: &StoreId,
        order: &OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) {
        self.changed.borrow_mut().push((order.clone(), from, to));
    }
}

struct Fixture {
    catalog: InMemoryCatalog,
    orders: InMemoryOrders,
    stores: InMemoryStores,
    events: RecordingEvents,
    store_id: StoreId,
    merchant: MerchantId,
    shirt: ProductId,
}

fn fixture() -> Fixture {
    let merchant = MerchantId::new("m-1");
    let store = Store::new(merchant.clone(), "دكان علي", "ali-shop");
    let store_id = store.id.clone();

    let mut shirt = Product::new(
        store_id.clone(),
        "قميص قطني",
        Money::new(25000, Currency::IQD),
    );
    shirt.id = ProductId::new("p-shirt");
    let shirt_id = shirt.id.clone();

    Fixture {
        catalog: InMemoryCatalog {
            products: vec![shirt],
        },
        orders: InMemoryOrders::default(),
        stores: InMemoryStores {
            stores: vec![store],
        },
        events: RecordingEvents::default(),
        store_id,
        merchant,
        shirt: shirt_id,
    }
}

fn request(f: &Fixture, city: &str, quantity: i64) -> PlaceOrderRequest {
    PlaceOrderRequest {
        store_id: f.store_id.clone(),
        customer_info: CustomerInfo {
            name: "علي حسن".to_string(),
            phone: "07701234567".to_string(),
            city: city.to_string(),
            landmark: None,
            notes: None,
        },
        items: vec![PlaceOrderItem {
            id: f.shirt.clone(),
            quantity,
            selections: BTreeMap::new(),
            // Tampered client price; must be ignored.
            price: Some(Money::new(1, Currency::IQD)),
        }],
    }
}

#[test]
fn placement_recomputes_prices_from_catalog() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);

    let order_id = engine.place_order(&request(&f, "بغداد", 2)).unwrap();
    let order = f.orders.order(&order_id).unwrap().unwrap();

    // Catalog price wins over the submitted price of 1.
    assert_eq!(order.items[0].price, Money::new(25000, Currency::IQD));
    assert_eq!(order.items[0].name, "قميص قطني");
    assert_eq!(order.delivery_fee, Money::new(5000, Currency::IQD));
    assert_eq!(order.total_price, Money::new(55000, Currency::IQD));
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.totals_consistent());
    assert_eq!(f.events.placed.borrow().len(), 1);
}

#[test]
fn placement_rejects_unserviced_city_without_persisting() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);

    let err = engine.place_order(&request(&f, "دبي", 1)).unwrap_err();
    assert!(matches!(err, CommerceError::NotServiced(_)));
    assert!(f.orders.rows.borrow().is_empty());
    assert!(f.events.placed.borrow().is_empty());
}

#[test]
fn placement_rejects_unknown_product_wholesale() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);

    let mut req = request(&f, "بغداد", 1);
    req.items.push(PlaceOrderItem {
        id: ProductId::new("p-ghost"),
        quantity: 1,
        selections: BTreeMap::new(),
        price: None,
    });

    let err = engine.place_order(&req).unwrap_err();
    assert!(matches!(err, CommerceError::ProductUnavailable(_)));
    assert!(f.orders.rows.borrow().is_empty());
}

#[test]
fn placement_rejects_out_of_stock_product() {
    let mut f = fixture();
    f.catalog.products[0].available = false;
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);

    let err = engine.place_order(&request(&f, "بغداد", 1)).unwrap_err();
    assert!(matches!(err, CommerceError::ProductUnavailable(_)));
}

#[test]
fn placement_rejects_unknown_store() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);

    let mut req = request(&f, "بغداد", 1);
    req.store_id = StoreId::new("s-ghost");
    let err = engine.place_order(&req).unwrap_err();
    assert!(matches!(err, CommerceError::StoreNotFound(_)));
}

#[test]
fn transition_happy_path_emits_event() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);
    let order_id = engine.place_order(&request(&f, "بغداد", 1)).unwrap();

    let transitions = OrderTransitions::new(&f.orders, &f.stores, &f.events);
    let status = transitions
        .update_status(
            &f.merchant,
            &StatusChangeRequest {
                order_id: order_id.clone(),
                new_status: "processing".to_string(),
                cancellation_reason: None,
            },
        )
        .unwrap();

    assert_eq!(status, OrderStatus::Processing);
    let changed = f.events.changed.borrow();
    assert_eq!(
        changed.last(),
        Some(&(order_id, OrderStatus::Pending, OrderStatus::Processing))
    );
}

#[test]
fn transition_rejects_unknown_status_value() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);
    let order_id = engine.place_order(&request(&f, "بغداد", 1)).unwrap();

    let transitions = OrderTransitions::new(&f.orders, &f.stores, &f.events);
    let err = transitions
        .update_status(
            &f.merchant,
            &StatusChangeRequest {
                order_id,
                new_status: "refunded".to_string(),
                cancellation_reason: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, CommerceError::InvalidStatus(_)));
}

#[test]
fn transition_rejects_foreign_merchant() {
    let mut f = fixture();
    let intruder = MerchantId::new("m-2");
    f.stores
        .stores
        .push(Store::new(intruder.clone(), "دكان آخر", "other-shop"));

    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);
    let order_id = engine.place_order(&request(&f, "بغداد", 1)).unwrap();

    let transitions = OrderTransitions::new(&f.orders, &f.stores, &f.events);
    let err = transitions
        .update_status(
            &intruder,
            &StatusChangeRequest {
                order_id: order_id.clone(),
                new_status: "completed".to_string(),
                cancellation_reason: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, CommerceError::NotAuthorized));

    // The order is untouched.
    let order = f.orders.order(&order_id).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
}

#[test]
fn transition_rejects_merchant_without_store() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);
    let order_id = engine.place_order(&request(&f, "بغداد", 1)).unwrap();

    let transitions = OrderTransitions::new(&f.orders, &f.stores, &f.events);
    let err = transitions
        .update_status(
            &MerchantId::new("m-nobody"),
            &StatusChangeRequest {
                order_id,
                new_status: "processing".to_string(),
                cancellation_reason: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, CommerceError::StoreNotFound(_)));
}

#[test]
fn cancellation_keeps_reason_other_transitions_drop_it() {
    let f = fixture();
    let engine = OrderPlacement::new(&f.catalog, &f.orders, &f.stores, &f.events);
    let order_id = engine.place_order(&request(&f, "بغداد", 1)).unwrap();

    let transitions = OrderTransitions::new(&f.orders, &f.stores, &f.events);
    transitions
        .update_status(
            &f.merchant,
            &StatusChangeRequest {
                order_id: order_id.clone(),
                new_status: "processing".to_string(),
                cancellation_reason: Some("ignored".to_string()),
            },
        )
        .unwrap();
    let order = f.orders.order(&order_id).unwrap().unwrap();
    assert_eq!(order.cancellation_reason, None);

    transitions
        .update_status(
            &f.merchant,
            &StatusChangeRequest {
                order_id: order_id.clone(),
                new_status: "cancelled".to_string(),
                cancellation_reason: Some("الزبون غير رأيه".to_string()),
            },
        )
        .unwrap();
    let order = f.orders.order(&order_id).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(
        order.cancellation_reason.as_deref(),
        Some("الزبون غير رأيه")
    );
}
