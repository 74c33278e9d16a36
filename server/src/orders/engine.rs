//! Order Lifecycle Engine
//!
//! Owns order/item creation, status transitions, and total recomputation.
//! Every multi-statement mutation runs in one transaction; broadcasts are
//! emitted only after the transaction has committed.

use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::models::{
    DiningTable, MenuItem, Order, OrderCreate, OrderDetail, OrderItem, OrderItemStatus,
    TableStatus,
};
use crate::db::repository::OrderRepository;
use crate::message::MessageBus;
use crate::orders::money;
use crate::utils::error::sqlx_err;
use crate::utils::{AppError, AppResult};
use shared::error::ErrorCode;
use shared::message::{BusMessage, EventType, ItemStatusPayload};

#[derive(Clone)]
pub struct OrderEngine {
    pool: SqlitePool,
    bus: MessageBus,
}

impl OrderEngine {
    pub fn new(pool: SqlitePool, bus: MessageBus) -> Self {
        Self { pool, bus }
    }

    /// Create an order for a table
    ///
    /// Resolves each requested line against the menu, snapshots the current
    /// price onto a queued item, computes the total, and flips the table to
    /// occupied — all in one transaction. Lines referencing a nonexistent
    /// menu item are silently skipped. Broadcasts `order_created`.
    pub async fn create_order(&self, req: OrderCreate) -> AppResult<OrderDetail> {
        let mut tx = self.pool.begin().await.map_err(sqlx_err)?;

        let table: Option<DiningTable> = sqlx::query_as("SELECT * FROM dining_table WHERE id = ?")
            .bind(req.table_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(sqlx_err)?;
        if table.is_none() {
            return Err(AppError::with_message(
                ErrorCode::TableNotFound,
                format!("Table {} not found", req.table_id),
            ));
        }

        // Resolve requested lines against the menu; snapshot prices
        let mut total = Decimal::ZERO;
        let mut resolved: Vec<(MenuItem, i64, Option<String>)> = Vec::new();
        for (idx, input) in req.items.iter().enumerate() {
            if input.quantity < 1 {
                return Err(AppError::validation(format!(
                    "Item {}: quantity must be at least 1",
                    idx + 1
                )));
            }
            let menu: Option<MenuItem> = sqlx::query_as("SELECT * FROM menu_item WHERE id = ?")
                .bind(input.menu_item_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(sqlx_err)?;
            let Some(menu) = menu else {
                tracing::debug!(menu_item_id = input.menu_item_id, "Skipping unknown menu item");
                continue;
            };
            total += money::line_total(menu.price, input.quantity);
            resolved.push((menu, input.quantity, input.notes.clone()));
        }

        if resolved.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::EmptyOrder,
                "Order has no billable items",
            ));
        }

        let order: Order = sqlx::query_as(
            "INSERT INTO orders (table_id, status, total) VALUES (?, 'pending', ?) RETURNING *",
        )
        .bind(req.table_id)
        .bind(money::to_f64(total))
        .fetch_one(&mut *tx)
        .await
        .map_err(sqlx_err)?;

        for (menu, quantity, notes) in &resolved {
            sqlx::query(
                "INSERT INTO order_item (order_id, menu_item_id, quantity, price, status, notes) \
                 VALUES (?, ?, ?, ?, 'queued', ?)",
            )
            .bind(order.id)
            .bind(menu.id)
            .bind(quantity)
            .bind(menu.price)
            .bind(notes)
            .execute(&mut *tx)
            .await
            .map_err(sqlx_err)?;
        }

        sqlx::query("UPDATE dining_table SET status = ? WHERE id = ?")
            .bind(TableStatus::Occupied)
            .bind(req.table_id)
            .execute(&mut *tx)
            .await
            .map_err(sqlx_err)?;

        let detail = OrderRepository::fetch_detail(&mut tx, order.id)
            .await?
            .ok_or_else(|| AppError::integrity(format!("Order {} vanished mid-create", order.id)))?;

        tx.commit().await.map_err(sqlx_err)?;

        self.bus.publish(BusMessage::event(EventType::OrderCreated, &detail));
        Ok(detail)
    }

    /// Confirm an order (pending -> confirmed, idempotent overwrite)
    ///
    /// Broadcasts `order_confirmed`.
    pub async fn confirm_order(&self, order_id: i64) -> AppResult<Order> {
        let order: Option<Order> =
            sqlx::query_as("UPDATE orders SET status = 'confirmed' WHERE id = ? RETURNING *")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(sqlx_err)?;
        let order = order.ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
        })?;

        self.bus.publish(BusMessage::event(EventType::OrderConfirmed, &order));
        Ok(order)
    }

    /// Overwrite an order item's status
    ///
    /// No transition graph beyond enum membership: kitchen staff may move
    /// items forward or correct mistakes. Broadcasts
    /// `order_item_status_updated`, and `order_ready` when the update leaves
    /// every item of the order ready, delivered, or cancelled.
    pub async fn update_item_status(
        &self,
        item_id: i64,
        new_status: OrderItemStatus,
    ) -> AppResult<OrderItem> {
        let item: Option<OrderItem> =
            sqlx::query_as("UPDATE order_item SET status = ? WHERE id = ? RETURNING *")
                .bind(new_status)
                .bind(item_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(sqlx_err)?;
        let item = item.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderItemNotFound,
                format!("Order item {item_id} not found"),
            )
        })?;

        let repo = OrderRepository::new(self.pool.clone());
        let detail = repo.find_detail(item.order_id).await?.ok_or_else(|| {
            AppError::integrity(format!(
                "Order item {} references missing order {}",
                item.id, item.order_id
            ))
        })?;

        let payload = ItemStatusPayload {
            item: serde_json::to_value(&item).unwrap_or_default(),
            order: serde_json::to_value(&detail).unwrap_or_default(),
        };
        self.bus
            .publish(BusMessage::event(EventType::OrderItemStatusUpdated, &payload));

        // Waiter pickup trigger: evaluated synchronously, no debounce
        if new_status == OrderItemStatus::Ready
            && detail.items.iter().all(|i| i.status.is_settled())
        {
            self.bus.publish(BusMessage::event(EventType::OrderReady, &detail));
        }

        Ok(item)
    }

    /// Cancel an order item and recompute the order total
    ///
    /// Allowed only while the item is still queued. The recomputation reads
    /// the item set after the cancellation is written, inside the same
    /// transaction. Broadcasts `order_item_cancelled` with the refreshed
    /// order. This is the only path that shrinks a total after creation.
    pub async fn cancel_item(&self, item_id: i64) -> AppResult<OrderDetail> {
        let mut tx = self.pool.begin().await.map_err(sqlx_err)?;

        let item = OrderRepository::fetch_item(&mut tx, item_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderItemNotFound,
                    format!("Order item {item_id} not found"),
                )
            })?;

        if item.status != OrderItemStatus::Queued {
            return Err(AppError::with_message(
                ErrorCode::ItemNotCancellable,
                format!("Order item {item_id} is already being prepared or delivered"),
            ));
        }

        sqlx::query("UPDATE order_item SET status = 'cancelled' WHERE id = ?")
            .bind(item_id)
            .execute(&mut *tx)
            .await
            .map_err(sqlx_err)?;

        let total = Self::recompute_total(&mut tx, item.order_id).await?;

        let updated = sqlx::query("UPDATE orders SET total = ? WHERE id = ?")
            .bind(money::to_f64(total))
            .bind(item.order_id)
            .execute(&mut *tx)
            .await
            .map_err(sqlx_err)?;
        if updated.rows_affected() == 0 {
            return Err(AppError::integrity(format!(
                "Order item {} references missing order {}",
                item.id, item.order_id
            )));
        }

        let detail = OrderRepository::fetch_detail(&mut tx, item.order_id)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!("Order {} vanished mid-cancel", item.order_id))
            })?;

        tx.commit().await.map_err(sqlx_err)?;

        self.bus
            .publish(BusMessage::event(EventType::OrderItemCancelled, &detail));
        Ok(detail)
    }

    /// Sum price x quantity over the order's non-cancelled items
    async fn recompute_total(
        conn: &mut SqliteConnection,
        order_id: i64,
    ) -> AppResult<Decimal> {
        let items = OrderRepository::fetch_items(conn, order_id).await?;
        let total = items
            .iter()
            .filter(|i| i.status != OrderItemStatus::Cancelled)
            .map(|i| money::line_total(i.price, i.quantity))
            .sum();
        Ok(total)
    }
}
