//! Order and Order Item Models

use serde::{Deserialize, Serialize};

use super::dining_table::DiningTable;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Order item status
///
/// Deliberately permissive: kitchen staff may move items forward or correct
/// mistakes, so no transition graph is enforced beyond enum membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum OrderItemStatus {
    #[default]
    Queued,
    Preparing,
    AlmostReady,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderItemStatus {
    /// True once the item no longer blocks the order-ready notification
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready | Self::Delivered | Self::Cancelled)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub status: OrderStatus,
    /// Derived: sum of price x quantity over non-cancelled items
    pub total: f64,
    pub created_at: String,
}

/// Order item entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    /// Menu price snapshot taken at creation time
    pub price: f64,
    pub status: OrderItemStatus,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Fully hydrated order: items and table included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub table: DiningTable,
}

/// Requested line item in a create-order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreate {
    pub table_id: i64,
    pub items: Vec<OrderItemInput>,
}
