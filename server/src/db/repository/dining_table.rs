//! Dining Table Repository

use super::{RepoError, RepoResult, is_unique_violation};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct DiningTableRepository {
    pool: SqlitePool,
}

impl DiningTableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find all tables ordered by number
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> =
            sqlx::query_as("SELECT * FROM dining_table ORDER BY number")
                .fetch_all(&self.pool)
                .await?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiningTable>> {
        let table: Option<DiningTable> =
            sqlx::query_as("SELECT * FROM dining_table WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(table)
    }

    /// Find table by its QR token (customer entry point)
    pub async fn find_by_qr_token(&self, token: &str) -> RepoResult<Option<DiningTable>> {
        let table: Option<DiningTable> =
            sqlx::query_as("SELECT * FROM dining_table WHERE qr_token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(table)
    }

    /// Create a new table with a fresh QR token
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let qr_token = uuid::Uuid::new_v4().to_string();
        let table: DiningTable = sqlx::query_as(
            "INSERT INTO dining_table (number, capacity, qr_token) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(data.number)
        .bind(data.capacity.unwrap_or(4))
        .bind(qr_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Duplicate(format!("Table {} already exists", data.number))
            } else {
                RepoError::Database(e)
            }
        })?;
        Ok(table)
    }

    /// Update a table
    pub async fn update(&self, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id}")))?;

        let table: DiningTable = sqlx::query_as(
            "UPDATE dining_table SET number = ?, capacity = ?, status = ? WHERE id = ? RETURNING *",
        )
        .bind(data.number.unwrap_or(existing.number))
        .bind(data.capacity.unwrap_or(existing.capacity))
        .bind(data.status.unwrap_or(existing.status))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Duplicate("Another table already has that number".to_string())
            } else {
                RepoError::Database(e)
            }
        })?;
        Ok(table)
    }

    /// Hard delete a table
    pub async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM dining_table WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
