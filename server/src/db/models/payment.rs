//! Payment Model

use serde::{Deserialize, Serialize};

use super::bill_share::{BillShare, BillShareInput};

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Payment entity
///
/// One row per order, also for split bills: the single payment anchors all
/// shares and carries the authoritative amount.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub table_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
    pub created_at: String,
}

/// Plain (non-split) payment payload
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCreate {
    pub order_id: i64,
    pub table_id: i64,
    pub amount: f64,
    pub method: PaymentMethod,
}

/// Split-bill creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct SplitBillCreate {
    pub order_id: i64,
    pub table_id: i64,
    pub method: PaymentMethod,
    pub shares: Vec<BillShareInput>,
}

/// Result of a successful split-bill creation
#[derive(Debug, Clone, Serialize)]
pub struct SplitBillResult {
    pub payment: Payment,
    pub shares: Vec<BillShare>,
}
