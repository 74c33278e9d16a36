//! Split-Bill Settlement Engine
//!
//! Multi-party bill share creation and all-or-nothing settlement. Both the
//! creation path and the completion path run as single transactions: the
//! all-paid check must observe the just-committed flag flip, and order/table
//! completion must never land unless every share is confirmed paid.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::models::{
    BillShare, Order, OrderStatus, Payment, PaymentCreate, SplitBillCreate, SplitBillResult,
    TableStatus,
};
use crate::db::repository::{PaymentRepository, is_unique_violation};
use crate::message::MessageBus;
use crate::orders::money;
use crate::utils::error::sqlx_err;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::message::{BusMessage, EventType, PaymentProcessedPayload, SplitBillCompletedPayload};

/// Outcome of marking one share paid
#[derive(Debug, Clone, Serialize)]
pub struct ShareSettlement {
    pub share: BillShare,
    /// True when this flip settled the whole bill
    pub all_paid: bool,
}

#[derive(Clone)]
pub struct SettlementEngine {
    pool: SqlitePool,
    bus: MessageBus,
}

impl SettlementEngine {
    pub fn new(pool: SqlitePool, bus: MessageBus) -> Self {
        Self { pool, bus }
    }

    /// Create a split bill: one payment anchoring one share per named payer
    ///
    /// The order's stored total is authoritative; client share amounts are
    /// validated against it, never trusted as the total. The first invalid
    /// share aborts the whole operation, naming its 1-based index. Nothing is
    /// persisted on failure. No broadcast on creation; only completion
    /// notifies terminals.
    pub async fn create_split_bill(&self, req: SplitBillCreate) -> AppResult<SplitBillResult> {
        if req.shares.is_empty() {
            return Err(AppError::validation("At least one share is required"));
        }

        let mut tx = self.pool.begin().await.map_err(sqlx_err)?;

        let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(req.order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_err)?;
        let order = order.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", req.order_id),
            )
        })?;

        if order.status != OrderStatus::Confirmed {
            return Err(AppError::invalid_state(
                "Order must be confirmed to create split bill",
            ));
        }
        if req.table_id != order.table_id {
            return Err(AppError::validation(format!(
                "Table {} does not match the order's table {}",
                req.table_id, order.table_id
            )));
        }

        // Validate shares against the authoritative total
        let total = money::to_decimal(order.total);
        let mut sum = Decimal::ZERO;
        for (idx, share) in req.shares.iter().enumerate() {
            if share.customer_name.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Share {}: customer name is required",
                    idx + 1
                )));
            }
            if !share.amount.is_finite() || share.amount <= 0.0 {
                return Err(AppError::validation(format!(
                    "Share {}: amount must be a positive number",
                    idx + 1
                )));
            }
            sum += money::to_decimal(share.amount);
        }
        if !money::amounts_match(sum, total) {
            return Err(AppError::with_message(
                ErrorCode::ShareAmountMismatch,
                format!(
                    "Share amounts ({:.2}) do not match order total ({:.2})",
                    money::to_f64(sum),
                    order.total
                ),
            ));
        }

        let payment = Self::insert_payment(&mut tx, &order, req.method).await?;

        let mut shares = Vec::with_capacity(req.shares.len());
        for share in &req.shares {
            let row: BillShare = sqlx::query_as(
                "INSERT INTO bill_share (payment_id, customer_name, amount) \
                 VALUES (?, ?, ?) RETURNING *",
            )
            .bind(payment.id)
            .bind(share.customer_name.trim())
            .bind(money::to_f64(money::to_decimal(share.amount)))
            .fetch_one(&mut *tx)
            .await
            .map_err(sqlx_err)?;
            shares.push(row);
        }

        tx.commit().await.map_err(sqlx_err)?;

        tracing::info!(
            payment_id = payment.id,
            order_id = order.id,
            shares = shares.len(),
            "Split bill created"
        );
        Ok(SplitBillResult { payment, shares })
    }

    /// Record a plain (non-split) payment and settle the order immediately
    ///
    /// Marks the order completed and frees the table in the same
    /// transaction, then broadcasts `payment_processed`.
    pub async fn record_payment(&self, req: PaymentCreate) -> AppResult<Payment> {
        if !req.amount.is_finite() || req.amount <= 0.0 {
            return Err(AppError::validation("Amount must be a positive number"));
        }

        let mut tx = self.pool.begin().await.map_err(sqlx_err)?;

        let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(req.order_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_err)?;
        let order = order.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", req.order_id),
            )
        })?;
        if req.table_id != order.table_id {
            return Err(AppError::validation(format!(
                "Table {} does not match the order's table {}",
                req.table_id, order.table_id
            )));
        }

        let payment: Payment = sqlx::query_as(
            "INSERT INTO payment (order_id, table_id, amount, method) \
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(order.id)
        .bind(order.table_id)
        .bind(money::to_f64(money::to_decimal(req.amount)))
        .bind(req.method)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::with_message(
                    ErrorCode::PaymentAlreadyExists,
                    format!("Order {} already has a payment", order.id),
                )
            } else {
                sqlx_err(e)
            }
        })?;

        Self::complete_order_and_free_table(&mut tx, order.id, order.table_id).await?;

        tx.commit().await.map_err(sqlx_err)?;

        let payload = PaymentProcessedPayload {
            payment: serde_json::to_value(&payment).unwrap_or_default(),
            order_id: order.id,
            table_id: order.table_id,
            is_split_bill: false,
        };
        self.bus
            .publish(BusMessage::event(EventType::PaymentProcessed, &payload));
        Ok(payment)
    }

    /// Mark one share paid; settle order and table when it was the last one
    ///
    /// The flag flip and the all-paid check share one transaction so two
    /// concurrent calls cannot both observe "not all paid" and neither drive
    /// completion. `split_bill_completed` is broadcast only after commit.
    pub async fn mark_share_paid(&self, share_id: i64) -> AppResult<ShareSettlement> {
        let mut tx = self.pool.begin().await.map_err(sqlx_err)?;

        let share: Option<BillShare> =
            sqlx::query_as("UPDATE bill_share SET paid = 1 WHERE id = ? RETURNING *")
                .bind(share_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(sqlx_err)?;
        let share = share.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ShareNotFound,
                format!("Bill share {share_id} not found"),
            )
        })?;

        let siblings = PaymentRepository::fetch_shares(&mut tx, share.payment_id).await?;
        let all_paid = siblings.iter().all(|s| s.paid);

        if !all_paid {
            // Commit just the flag flip; order and table stay untouched
            tx.commit().await.map_err(sqlx_err)?;
            return Ok(ShareSettlement { share, all_paid });
        }

        // Data-integrity guard: a share's payment must reference its order
        // and table
        let payment = PaymentRepository::fetch_payment(&mut tx, share.payment_id)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!(
                    "Bill share {} references missing payment {}",
                    share.id, share.payment_id
                ))
            })?;

        Self::complete_order_and_free_table(&mut tx, payment.order_id, payment.table_id).await?;

        tx.commit().await.map_err(sqlx_err)?;

        tracing::info!(
            payment_id = payment.id,
            order_id = payment.order_id,
            "Split bill fully settled"
        );
        let payload = SplitBillCompletedPayload {
            payment_id: payment.id,
            order_id: payment.order_id,
            table_id: payment.table_id,
        };
        self.bus
            .publish(BusMessage::event(EventType::SplitBillCompleted, &payload));
        Ok(ShareSettlement { share, all_paid })
    }

    async fn insert_payment(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        order: &Order,
        method: crate::db::models::PaymentMethod,
    ) -> AppResult<Payment> {
        sqlx::query_as(
            "INSERT INTO payment (order_id, table_id, amount, method) \
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(order.id)
        .bind(order.table_id)
        .bind(order.total)
        .bind(method)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::with_message(
                    ErrorCode::PaymentAlreadyExists,
                    format!("Order {} already has a payment", order.id),
                )
            } else {
                sqlx_err(e)
            }
        })
    }

    async fn complete_order_and_free_table(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        order_id: i64,
        table_id: i64,
    ) -> AppResult<()> {
        let updated = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(OrderStatus::Completed)
            .bind(order_id)
            .execute(&mut **tx)
            .await
            .map_err(sqlx_err)?;
        if updated.rows_affected() == 0 {
            return Err(AppError::integrity(format!(
                "Payment references missing order {order_id}"
            )));
        }

        let updated = sqlx::query("UPDATE dining_table SET status = ? WHERE id = ?")
            .bind(TableStatus::Free)
            .bind(table_id)
            .execute(&mut **tx)
            .await
            .map_err(sqlx_err)?;
        if updated.rows_affected() == 0 {
            return Err(AppError::integrity(format!(
                "Payment references missing table {table_id}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{BillShareInput, PaymentMethod};

    async fn setup() -> (SettlementEngine, SqlitePool) {
        let db = DbService::in_memory().await.unwrap();
        let bus = MessageBus::new();
        (SettlementEngine::new(db.pool.clone(), bus), db.pool)
    }

    /// Seed a confirmed order with a fixed total, returning (order_id, table_id)
    async fn seed_confirmed_order(pool: &SqlitePool, total: f64) -> (i64, i64) {
        let table_id: i64 = sqlx::query_scalar(
            "INSERT INTO dining_table (number, capacity, status, qr_token) \
             VALUES (1, 4, 'occupied', 'tok-1') RETURNING id",
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let order_id: i64 = sqlx::query_scalar(
            "INSERT INTO orders (table_id, status, total) VALUES (?, 'confirmed', ?) RETURNING id",
        )
        .bind(table_id)
        .bind(total)
        .fetch_one(pool)
        .await
        .unwrap();
        (order_id, table_id)
    }

    fn share(name: &str, amount: f64) -> BillShareInput {
        BillShareInput {
            customer_name: name.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_split_bill_happy_path() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;

        let result = engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Card,
                shares: vec![share("Alice", 15.00), share("Bob", 15.00)],
            })
            .await
            .unwrap();

        assert_eq!(result.payment.amount, 30.00);
        assert_eq!(result.shares.len(), 2);
        assert!(result.shares.iter().all(|s| !s.paid));
    }

    #[tokio::test]
    async fn test_split_bill_sum_mismatch_persists_nothing() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;

        let err = engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Cash,
                shares: vec![share("Alice", 10.00), share("Bob", 15.00)],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ShareAmountMismatch);
        assert!(err.message.contains("25.00"));
        assert!(err.message.contains("30.00"));

        let payment = PaymentRepository::new(pool.clone())
            .find_by_order(order_id)
            .await
            .unwrap();
        assert!(payment.is_none());
        let shares: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bill_share")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(shares, 0);
    }

    #[tokio::test]
    async fn test_split_bill_tolerates_one_cent() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;

        engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Cash,
                shares: vec![share("Alice", 15.00), share("Bob", 15.01)],
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_split_bill_share_validation_names_index() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;

        let err = engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Cash,
                shares: vec![share("Alice", 15.00), share("  ", 15.00)],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.starts_with("Share 2:"));

        let err = engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Cash,
                shares: vec![share("Alice", -1.00), share("Bob", 31.00)],
            })
            .await
            .unwrap_err();
        assert!(err.message.starts_with("Share 1:"));
    }

    #[tokio::test]
    async fn test_split_bill_requires_confirmed_order() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;
        sqlx::query("UPDATE orders SET status = 'pending' WHERE id = ?")
            .bind(order_id)
            .execute(&pool)
            .await
            .unwrap();

        let err = engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Cash,
                shares: vec![share("Alice", 30.00)],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderState);
    }

    #[tokio::test]
    async fn test_mark_share_paid_settles_only_on_last_share() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;

        let result = engine
            .create_split_bill(SplitBillCreate {
                order_id,
                table_id,
                method: PaymentMethod::Card,
                shares: vec![share("Alice", 15.00), share("Bob", 15.00)],
            })
            .await
            .unwrap();

        // First share: flag only
        let outcome = engine.mark_share_paid(result.shares[0].id).await.unwrap();
        assert!(outcome.share.paid);
        assert!(!outcome.all_paid);
        let status: OrderStatus = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Confirmed);

        // Last share: order completed, table freed
        let outcome = engine.mark_share_paid(result.shares[1].id).await.unwrap();
        assert!(outcome.all_paid);
        let status: OrderStatus = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Completed);
        let table_status: TableStatus =
            sqlx::query_scalar("SELECT status FROM dining_table WHERE id = ?")
                .bind(table_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(table_status, TableStatus::Free);
    }

    #[tokio::test]
    async fn test_mark_share_paid_missing_share() {
        let (engine, _pool) = setup().await;
        let err = engine.mark_share_paid(404).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ShareNotFound);
    }

    #[tokio::test]
    async fn test_record_payment_settles_immediately() {
        let (engine, pool) = setup().await;
        let (order_id, table_id) = seed_confirmed_order(&pool, 30.00).await;

        let payment = engine
            .record_payment(PaymentCreate {
                order_id,
                table_id,
                amount: 30.00,
                method: PaymentMethod::Cash,
            })
            .await
            .unwrap();
        assert_eq!(payment.amount, 30.00);

        let status: OrderStatus = sqlx::query_scalar("SELECT status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(status, OrderStatus::Completed);

        // Second payment on the same order is rejected by the store
        let err = engine
            .record_payment(PaymentCreate {
                order_id,
                table_id,
                amount: 30.00,
                method: PaymentMethod::Cash,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentAlreadyExists);
    }
}
