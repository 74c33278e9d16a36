//! Menu Item Repository

use super::{RepoError, RepoResult};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all menu items ordered by category then name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> =
            sqlx::query_as("SELECT * FROM menu_item ORDER BY category, name")
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    /// Find only items currently offered to customers
    pub async fn find_available(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = sqlx::query_as(
            "SELECT * FROM menu_item WHERE available = 1 ORDER BY category, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = sqlx::query_as("SELECT * FROM menu_item WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let item: MenuItem = sqlx::query_as(
            "INSERT INTO menu_item (name, category, price, available, prep_minutes) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(data.name)
        .bind(data.category)
        .bind(data.price)
        .bind(data.available.unwrap_or(true))
        .bind(data.prep_minutes.unwrap_or(15))
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Update a menu item
    ///
    /// Price edits only affect future orders; existing order items keep
    /// their snapshot.
    pub async fn update(&self, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id}")))?;

        let item: MenuItem = sqlx::query_as(
            "UPDATE menu_item SET name = ?, category = ?, price = ?, available = ?, \
             prep_minutes = ? WHERE id = ? RETURNING *",
        )
        .bind(data.name.unwrap_or(existing.name))
        .bind(data.category.unwrap_or(existing.category))
        .bind(data.price.unwrap_or(existing.price))
        .bind(data.available.unwrap_or(existing.available))
        .bind(data.prep_minutes.unwrap_or(existing.prep_minutes))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    /// Hard delete a menu item
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM menu_item WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
