//! Broadcast message types
//!
//! Every state change pushed to connected terminals travels as a
//! [`BusMessage`] — a `{type, data}` JSON envelope. Engine events use the
//! typed [`EventType`] catalog; plain entity CRUD uses `<resource>_<action>`
//! type strings built by [`BusMessage::sync`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod payload;
pub use payload::*;

/// Typed event catalog for the order and settlement engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A new order was created for a table
    OrderCreated,
    /// An order moved from pending to confirmed
    OrderConfirmed,
    /// A single order item changed status
    OrderItemStatusUpdated,
    /// Every item of an order is ready, delivered, or cancelled
    OrderReady,
    /// An order item was cancelled and the total recomputed
    OrderItemCancelled,
    /// A plain (non-split) payment settled an order
    PaymentProcessed,
    /// The last share of a split bill was paid
    SplitBillCompleted,
}

impl EventType {
    /// Wire name of the event (`snake_case`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderCreated => "order_created",
            Self::OrderConfirmed => "order_confirmed",
            Self::OrderItemStatusUpdated => "order_item_status_updated",
            Self::OrderReady => "order_ready",
            Self::OrderItemCancelled => "order_item_cancelled",
            Self::PaymentProcessed => "payment_processed",
            Self::SplitBillCompleted => "split_bill_completed",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `{type, data}` envelope pushed to every connected terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    /// Event type name (engine event or `<resource>_<action>`)
    #[serde(rename = "type")]
    pub event: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl BusMessage {
    /// Build an engine event message
    ///
    /// Serialization failures are unrepresentable for the payload types in
    /// use; a failure degrades to `null` data rather than dropping the event.
    pub fn event<T: Serialize>(event: EventType, data: &T) -> Self {
        Self {
            event: event.as_str().to_string(),
            data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Build an entity CRUD sync message (`<resource>_<action>`)
    ///
    /// `data` is the entity on create/update and `None` on delete, in which
    /// case only the id is carried.
    pub fn sync<T: Serialize>(resource: &str, action: &str, id: i64, data: Option<&T>) -> Self {
        let data = match data {
            Some(d) => serde_json::to_value(d).unwrap_or(serde_json::Value::Null),
            None => serde_json::json!({ "id": id }),
        };
        Self {
            event: format!("{resource}_{action}"),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_names() {
        assert_eq!(EventType::OrderCreated.as_str(), "order_created");
        assert_eq!(
            EventType::OrderItemStatusUpdated.as_str(),
            "order_item_status_updated"
        );
        assert_eq!(EventType::SplitBillCompleted.as_str(), "split_bill_completed");
    }

    #[test]
    fn test_envelope_shape() {
        let msg = BusMessage::event(EventType::OrderConfirmed, &serde_json::json!({"id": 7}));
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "order_confirmed");
        assert_eq!(json["data"]["id"], 7);
    }

    #[test]
    fn test_sync_delete_carries_id_only() {
        let msg = BusMessage::sync::<()>("table", "deleted", 3, None);
        assert_eq!(msg.event, "table_deleted");
        assert_eq!(msg.data, serde_json::json!({"id": 3}));
    }
}
