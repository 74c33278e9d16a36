//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::billing::ShareSettlement;
use crate::core::ServerState;
use crate::db::models::{BillShare, Payment, PaymentCreate, SplitBillCreate, SplitBillResult};
use crate::db::repository::PaymentRepository;
use crate::utils::{AppError, AppResult};

/// Payment with its shares (empty for plain payments)
#[derive(Debug, Serialize)]
pub struct PaymentDetail {
    #[serde(flatten)]
    pub payment: Payment,
    pub shares: Vec<BillShare>,
}

/// POST /api/payments - record a plain payment, settling the order
pub async fn record_payment(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    let payment = state.billing.record_payment(payload).await?;
    Ok(Json(payment))
}

/// POST /api/payments/split - create a split bill for a confirmed order
pub async fn create_split_bill(
    State(state): State<ServerState>,
    Json(payload): Json<SplitBillCreate>,
) -> AppResult<Json<SplitBillResult>> {
    let result = state.billing.create_split_bill(payload).await?;
    Ok(Json(result))
}

/// POST /api/payments/shares/:id/pay - mark one share paid
pub async fn pay_share(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShareSettlement>> {
    let outcome = state.billing.mark_share_paid(id).await?;
    Ok(Json(outcome))
}

/// GET /api/payments/order/:order_id - payment and shares for an order
pub async fn get_by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<PaymentDetail>> {
    let repo = PaymentRepository::new(state.db.pool.clone());
    let payment = repo
        .find_by_order(order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment for order {order_id}")))?;
    let shares = repo.shares_for_payment(payment.id).await?;
    Ok(Json(PaymentDetail { payment, shares }))
}
