//! Waiter Call API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/waiter-calls", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_open))
        .route("/", post(handler::create))
        .route("/{id}/resolve", post(handler::resolve))
}
