//! Dish Review Model

use serde::{Deserialize, Serialize};

/// Customer review of a menu item; independent CRUD lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DishReview {
    pub id: i64,
    pub menu_item_id: i64,
    pub customer_name: String,
    /// 1 to 5, enforced by the store
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Create review payload
#[derive(Debug, Clone, Deserialize)]
pub struct DishReviewCreate {
    pub menu_item_id: i64,
    pub customer_name: String,
    pub rating: i64,
    pub comment: Option<String>,
}
