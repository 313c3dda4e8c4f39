//! Orders: the persisted record, the status state machine, and the
//! pricing & validation engine that creates them.

mod order;
mod placement;
mod status;

pub use order::{CustomerInfo, Order, OrderItem};
pub use placement::{
    valid_phone, validate_customer_info, validate_items, OrderPlacement, PlaceOrderItem,
    PlaceOrderRequest, PlacementResponse, CITY_MIN_LEN, LANDMARK_MAX_LEN, NAME_MAX_LEN,
    NAME_MIN_LEN, NOTES_MAX_LEN, PHONE_MAX_LEN, PHONE_MIN_LEN, QUANTITY_MAX, QUANTITY_MIN,
};
pub use status::{OrderStatus, OrderTransitions, StatusChangeRequest};

use crate::error::CommerceError;
use crate::ids::OrderId;

/// Persistence for orders.
///
/// Order rows are created only by [`OrderPlacement`] and mutated only by
/// [`OrderTransitions`]. Backed by the relational store in production;
/// in-memory fakes in tests.
pub trait OrderRepository {
    /// Insert a new order row.
    fn insert(&self, order: &Order) -> Result<(), CommerceError>;

    /// Load an order by id.
    fn order(&self, id: &OrderId) -> Result<Option<Order>, CommerceError>;

    /// Persist a status change with an optional cancellation reason.
    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        reason: Option<String>,
    ) -> Result<(), CommerceError>;
}
