//! Lifecycle events pushed to real-time subscribers

use serde::{Deserialize, Serialize};

use crate::types::Order;

/// Order lifecycle events. The `event` tag carries the wire name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A waiter placed a new order
    NewOrder { order: Order },

    /// The kitchen moved an order to another status
    OrderUpdated { order: Order },

    /// An order was removed; only its id survives
    OrderDeleted { order_id: u64 },
}

impl OrderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::NewOrder { .. } => "new_order",
            OrderEvent::OrderUpdated { .. } => "order_updated",
            OrderEvent::OrderDeleted { .. } => "order_deleted",
        }
    }

    pub fn order_id(&self) -> u64 {
        match self {
            OrderEvent::NewOrder { order } | OrderEvent::OrderUpdated { order } => order.id,
            OrderEvent::OrderDeleted { order_id } => *order_id,
        }
    }
}

/// Event wrapper sent over the wire
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WsMessage {
    #[serde(flatten)]
    pub event: OrderEvent,

    /// Monotonically increasing sequence ID for gap detection
    pub sequence_id: u64,

    /// Unix timestamp when the event was published
    pub timestamp: i64,
}
