//! Dish Review Repository

use super::RepoResult;
use crate::db::models::{DishReview, DishReviewCreate};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reviews for one menu item, newest first
    pub async fn find_by_menu_item(&self, menu_item_id: i64) -> RepoResult<Vec<DishReview>> {
        let reviews: Vec<DishReview> = sqlx::query_as(
            "SELECT * FROM dish_review WHERE menu_item_id = ? ORDER BY created_at DESC",
        )
        .bind(menu_item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    /// Create a review
    pub async fn create(&self, data: DishReviewCreate) -> RepoResult<DishReview> {
        let review: DishReview = sqlx::query_as(
            "INSERT INTO dish_review (menu_item_id, customer_name, rating, comment) \
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(data.menu_item_id)
        .bind(data.customer_name)
        .bind(data.rating)
        .bind(data.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    /// Hard delete a review
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM dish_review WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
