//! Order Repository
//!
//! Read side of the order engine. The hydration queries double as
//! transaction-scoped helpers: the engines call the `fetch_*` functions with
//! their open transaction so every read observes the writes made so far.

use super::{RepoError, RepoResult};
use crate::db::models::{DiningTable, Order, OrderDetail, OrderItem};
use sqlx::{SqliteConnection, SqlitePool};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Orders that still hold a table (pending or confirmed)
    pub async fn list_active(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = sqlx::query_as(
            "SELECT * FROM orders WHERE status IN ('pending', 'confirmed') ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Fully hydrated order (items + table)
    pub async fn find_detail(&self, id: i64) -> RepoResult<Option<OrderDetail>> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_detail(&mut conn, id).await
    }

    // ==================== Transaction-scoped helpers ====================

    /// Load order, items, and table on the given connection
    pub async fn fetch_detail(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> RepoResult<Option<OrderDetail>> {
        let order: Option<Order> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        let Some(order) = order else {
            return Ok(None);
        };

        let items = Self::fetch_items(&mut *conn, order.id).await?;

        let table: DiningTable = sqlx::query_as("SELECT * FROM dining_table WHERE id = ?")
            .bind(order.table_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {}", order.table_id)))?;

        Ok(Some(OrderDetail {
            order,
            items,
            table,
        }))
    }

    /// All items of an order, oldest first
    pub async fn fetch_items(
        conn: &mut SqliteConnection,
        order_id: i64,
    ) -> RepoResult<Vec<OrderItem>> {
        let items: Vec<OrderItem> =
            sqlx::query_as("SELECT * FROM order_item WHERE order_id = ? ORDER BY id")
                .bind(order_id)
                .fetch_all(&mut *conn)
                .await?;
        Ok(items)
    }

    /// Single order item on the given connection
    pub async fn fetch_item(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> RepoResult<Option<OrderItem>> {
        let item: Option<OrderItem> = sqlx::query_as("SELECT * FROM order_item WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(item)
    }
}
