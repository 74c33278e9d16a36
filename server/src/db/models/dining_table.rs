//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table status
///
/// Flips to `occupied` on the first order and back to `free` only when the
/// active order is fully settled, split-bill shares included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiningTable {
    pub id: i64,
    pub number: i64,
    pub capacity: i64,
    pub status: TableStatus,
    /// Unique token encoded into the table's QR code
    pub qr_token: String,
    pub created_at: String,
}

/// Create table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableCreate {
    pub number: i64,
    pub capacity: Option<i64>,
}

/// Update table payload
#[derive(Debug, Clone, Deserialize)]
pub struct DiningTableUpdate {
    pub number: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<TableStatus>,
}
