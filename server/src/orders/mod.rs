//! Order Lifecycle Engine
//!
//! Order/item creation, status transitions, derived totals. Settlement lives
//! in [`crate::billing`].

mod engine;
pub mod money;

pub use engine::OrderEngine;
