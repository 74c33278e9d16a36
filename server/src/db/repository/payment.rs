//! Payment Repository
//!
//! Read side of the settlement engine; the engine itself writes payments and
//! shares inside its own transactions.

use super::RepoResult;
use crate::db::models::{BillShare, Payment};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Payment anchored to an order, if any
    pub async fn find_by_order(&self, order_id: i64) -> RepoResult<Option<Payment>> {
        let payment: Option<Payment> = sqlx::query_as("SELECT * FROM payment WHERE order_id = ?")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payment)
    }

    /// All shares of a payment
    pub async fn shares_for_payment(&self, payment_id: i64) -> RepoResult<Vec<BillShare>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_shares(&mut conn, payment_id).await
    }

    // ==================== Transaction-scoped helpers ====================

    /// All shares of a payment on the given connection
    pub async fn fetch_shares(
        conn: &mut SqliteConnection,
        payment_id: i64,
    ) -> RepoResult<Vec<BillShare>> {
        let shares: Vec<BillShare> =
            sqlx::query_as("SELECT * FROM bill_share WHERE payment_id = ? ORDER BY id")
                .bind(payment_id)
                .fetch_all(&mut *conn)
                .await?;
        Ok(shares)
    }

    /// Payment row on the given connection
    pub async fn fetch_payment(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> RepoResult<Option<Payment>> {
        let payment: Option<Payment> = sqlx::query_as("SELECT * FROM payment WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(payment)
    }
}
