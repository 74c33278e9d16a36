//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// `price` edits never alter existing order items; the order engine snapshots
/// the price at order-item creation time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Price in currency unit, 2 decimal places
    pub price: f64,
    pub available: bool,
    /// Kitchen prep-time estimate in minutes
    pub prep_minutes: i64,
    pub created_at: String,
}

/// Create menu item payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub available: Option<bool>,
    pub prep_minutes: Option<i64>,
}

/// Update menu item payload
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
    pub prep_minutes: Option<i64>,
}
