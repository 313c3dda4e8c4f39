//! In-process order event notifications.
//!
//! Dashboards learn about new orders and status changes through a push
//! channel that is fire-and-forget: delivery is not guaranteed, and
//! consumers must tolerate missed or duplicate notifications by
//! periodically reconciling with direct reads. The engines in this crate
//! emit through this trait instead of any ambient global event bus.

use crate::ids::{OrderId, StoreId};
use crate::orders::OrderStatus;

/// Sink for order lifecycle notifications.
pub trait OrderEventSink {
    /// A new order was persisted for a store.
    fn order_placed(&self, store: &StoreId, order: &OrderId) {
        let _ = (store, order);
    }

    /// An order's status changed.
    fn status_changed(&self, store: &StoreId, order: &OrderId, from: OrderStatus, to: OrderStatus) {
        let _ = (store, order, from, to);
    }
}

/// Sink that drops every notification.
pub struct NullEventSink;

impl OrderEventSink for NullEventSink {}
