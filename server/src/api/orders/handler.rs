//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderDetail, OrderItem, OrderItemStatus};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ItemStatusUpdate {
    pub status: OrderItemStatus,
}

/// POST /api/orders - place an order for a table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.orders.create_order(payload).await?;
    Ok(Json(detail))
}

/// GET /api/orders - orders still holding a table (pending or confirmed)
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.db.pool.clone())
        .list_active()
        .await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - hydrated order with items and table
pub async fn get_detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = OrderRepository::new(state.db.pool.clone())
        .find_detail(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(detail))
}

/// POST /api/orders/:id/confirm
pub async fn confirm(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = state.orders.confirm_order(id).await?;
    Ok(Json(order))
}

/// PUT /api/orders/items/:id/status - kitchen progress update
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ItemStatusUpdate>,
) -> AppResult<Json<OrderItem>> {
    let item = state.orders.update_item_status(id, payload.status).await?;
    Ok(Json(item))
}

/// POST /api/orders/items/:id/cancel
pub async fn cancel_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.orders.cancel_item(id).await?;
    Ok(Json(detail))
}
