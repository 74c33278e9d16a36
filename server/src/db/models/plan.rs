//! Subscription Plan Model
//!
//! Super-admin surface: plans offered to organizations. Each deployed server
//! serves a single organization, so plans carry no per-store state.

use serde::{Deserialize, Serialize};

/// Subscription plan entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub monthly_price: f64,
    pub max_tables: i64,
    pub active: bool,
    pub created_at: String,
}

/// Create plan payload
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionPlanCreate {
    pub name: String,
    pub monthly_price: f64,
    pub max_tables: i64,
}

/// Update plan payload
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionPlanUpdate {
    pub name: Option<String>,
    pub monthly_price: Option<f64>,
    pub max_tables: Option<i64>,
    pub active: Option<bool>,
}
