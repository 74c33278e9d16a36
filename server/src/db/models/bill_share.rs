//! Bill Share Model

use serde::{Deserialize, Serialize};

/// One named payer's share of a split bill
///
/// Invariant: the shares of a payment sum to the payment amount within one
/// cent at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BillShare {
    pub id: i64,
    pub payment_id: i64,
    pub customer_name: String,
    pub amount: f64,
    pub paid: bool,
    pub created_at: String,
}

/// Requested share in a split-bill payload
#[derive(Debug, Clone, Deserialize)]
pub struct BillShareInput {
    pub customer_name: String,
    pub amount: f64,
}
