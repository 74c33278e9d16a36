//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`tables`] - dining table management and QR lookup
//! - [`menu`] - menu item management
//! - [`orders`] - order lifecycle (engine-backed)
//! - [`payments`] - payments and split bills (engine-backed)
//! - [`waiter_calls`] - staff notifications
//! - [`reservations`] - table reservations
//! - [`reviews`] - dish reviews
//! - [`plans`] - subscription plans
//!
//! The `/ws` route upgrades to WebSocket for real-time event fan-out.

pub mod health;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod plans;
pub mod reservations;
pub mod reviews;
pub mod tables;
pub mod waiter_calls;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::message::ws_handler;

/// Build the full application router with middleware and state applied
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(payments::router())
        .merge(waiter_calls::router())
        .merge(reservations::router())
        .merge(reviews::router())
        .merge(plans::router())
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
