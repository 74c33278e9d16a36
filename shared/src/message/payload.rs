//! Typed payloads for engine events
//!
//! Entity bodies are carried as JSON values so terminals can deserialize
//! against their own model versions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of `order_item_status_updated`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStatusPayload {
    /// The updated order item
    pub item: Value,
    /// The refreshed parent order (items + table)
    pub order: Value,
}

/// Payload of `payment_processed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProcessedPayload {
    /// The recorded payment
    pub payment: Value,
    pub order_id: i64,
    pub table_id: i64,
    /// Always false on the plain payment path; split bills settle through
    /// `split_bill_completed` instead
    pub is_split_bill: bool,
}

/// Payload of `split_bill_completed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitBillCompletedPayload {
    pub payment_id: i64,
    pub order_id: i64,
    pub table_id: i64,
}
