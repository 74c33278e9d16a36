//! Dish Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{DishReview, DishReviewCreate};
use crate::db::repository::{MenuItemRepository, ReviewRepository};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "review";

/// GET /api/reviews/menu-item/:id - reviews for one dish, newest first
pub async fn list_for_menu_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<DishReview>>> {
    let reviews = ReviewRepository::new(state.db.pool.clone())
        .find_by_menu_item(id)
        .await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DishReviewCreate>,
) -> AppResult<Json<DishReview>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::validation("Rating must be between 1 and 5"));
    }
    MenuItemRepository::new(state.db.pool.clone())
        .find_by_id(payload.menu_item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", payload.menu_item_id)))?;

    let review = ReviewRepository::new(state.db.pool.clone())
        .create(payload)
        .await?;
    state.broadcast_sync(RESOURCE, "created", review.id, Some(&review));
    Ok(Json(review))
}

/// DELETE /api/reviews/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = ReviewRepository::new(state.db.pool.clone())
        .delete(id)
        .await?;
    if deleted {
        state.broadcast_sync::<()>(RESOURCE, "deleted", id, None);
    }
    Ok(Json(deleted))
}
