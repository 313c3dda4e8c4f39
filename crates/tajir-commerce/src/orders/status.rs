//! Order status state machine.

use crate::error::CommerceError;
use crate::events::OrderEventSink;
use crate::ids::{MerchantId, OrderId};
use crate::orders::{Order, OrderRepository};
use crate::store::StoreDirectory;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Order status.
///
/// Happy path: `pending -> processing -> shipped -> completed`.
/// `cancelled` and `returned` terminate from any non-terminal state;
/// `postponed` is reserved and currently unused by the dashboard flows.
///
/// The transition guard deliberately checks only that the target is a
/// recognized status and that the caller owns the order; it does not
/// enforce a source -> target matrix. Existing flows rely on loose jumps
/// such as reverting `processing` back to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting the merchant. The only initial state.
    #[default]
    Pending,
    /// Merchant accepted and is preparing the order.
    Processing,
    /// Order handed to the courier.
    Shipped,
    /// Order delivered and settled.
    Completed,
    /// Reserved: delivery postponed at the customer's request.
    Postponed,
    /// Order came back after shipping.
    Returned,
    /// Order cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Postponed => "postponed",
            OrderStatus::Returned => "returned",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "completed" => Some(OrderStatus::Completed),
            "postponed" => Some(OrderStatus::Postponed),
            "returned" => Some(OrderStatus::Returned),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Returned | OrderStatus::Cancelled
        )
    }

    /// Check if a transition to this status may carry a reason.
    pub fn takes_reason(&self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Returned)
    }
}

/// A requested status change, as it arrives from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    /// Target order.
    pub order_id: OrderId,
    /// Requested status, as a raw string to be validated.
    pub new_status: String,
    /// Free-text reason for cancellation or return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

/// Engine applying merchant-driven status transitions.
///
/// Ownership is re-derived from the acting merchant's identity: the
/// caller never supplies a store id. Concurrent transitions on the same
/// order are not serialized; the last write wins.
pub struct OrderTransitions<'a, R, S, E>
where
    R: OrderRepository,
    S: StoreDirectory,
    E: OrderEventSink,
{
    orders: &'a R,
    stores: &'a S,
    events: &'a E,
}

impl<'a, R, S, E> OrderTransitions<'a, R, S, E>
where
    R: OrderRepository,
    S: StoreDirectory,
    E: OrderEventSink,
{
    pub fn new(orders: &'a R, stores: &'a S, events: &'a E) -> Self {
        Self {
            orders,
            stores,
            events,
        }
    }

    /// Apply a status change on behalf of a merchant.
    ///
    /// Gates, in order: the target status must be a recognized value; the
    /// acting merchant must own a store; the order must exist and belong
    /// to that store. The reason is kept only for `cancelled`/`returned`.
    pub fn update_status(
        &self,
        actor: &MerchantId,
        request: &StatusChangeRequest,
    ) -> Result<OrderStatus, CommerceError> {
        let status = OrderStatus::from_str(&request.new_status)
            .ok_or_else(|| CommerceError::InvalidStatus(request.new_status.clone()))?;

        let store = self
            .stores
            .store_for_merchant(actor)?
            .ok_or_else(|| CommerceError::StoreNotFound(actor.to_string()))?;

        let order = self
            .orders
            .order(&request.order_id)?
            .ok_or_else(|| CommerceError::OrderNotFound(request.order_id.to_string()))?;

        if order.store_id != store.id {
            return Err(CommerceError::NotAuthorized);
        }

        let reason = if status.takes_reason() {
            request.cancellation_reason.clone()
        } else {
            None
        };

        if let Err(e) = self
            .orders
            .update_status(&request.order_id, status, reason)
        {
            error!(order = %request.order_id, error = %e, "failed to persist status change");
            return Err(e);
        }

        self.events
            .status_changed(&store.id, &request.order_id, order.status, status);

        Ok(status)
    }

    /// Load an order for the acting merchant, enforcing ownership.
    pub fn owned_order(
        &self,
        actor: &MerchantId,
        order_id: &OrderId,
    ) -> Result<Order, CommerceError> {
        let store = self
            .stores
            .store_for_merchant(actor)?
            .ok_or_else(|| CommerceError::StoreNotFound(actor.to_string()))?;
        let order = self
            .orders
            .order(order_id)?
            .ok_or_else(|| CommerceError::OrderNotFound(order_id.to_string()))?;
        if order.store_id != store.id {
            return Err(CommerceError::NotAuthorized);
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Completed,
            OrderStatus::Postponed,
            OrderStatus::Returned,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(s.as_str()), Some(s));
        }
        assert_eq!(OrderStatus::from_str("refunded"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Returned.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Postponed.is_terminal());
    }

    #[test]
    fn test_reason_only_for_terminating_deviations() {
        assert!(OrderStatus::Cancelled.takes_reason());
        assert!(OrderStatus::Returned.takes_reason());
        assert!(!OrderStatus::Completed.takes_reason());
    }
}
