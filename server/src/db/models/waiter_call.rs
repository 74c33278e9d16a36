//! Waiter Call Model

use serde::{Deserialize, Serialize};

/// Ephemeral waiter notification; no downstream effect on order/table state
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WaiterCall {
    pub id: i64,
    pub table_id: i64,
    pub reason: Option<String>,
    pub resolved: bool,
    pub created_at: String,
}

/// Create waiter call payload
#[derive(Debug, Clone, Deserialize)]
pub struct WaiterCallCreate {
    pub table_id: i64,
    pub reason: Option<String>,
}
