//! Order API module
//!
//! All mutations go through the order engine; handlers only translate HTTP.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/", get(handler::list_active))
        .route("/{id}", get(handler::get_detail))
        .route("/{id}/confirm", post(handler::confirm))
        .route("/items/{id}/status", put(handler::update_item_status))
        .route("/items/{id}/cancel", post(handler::cancel_item))
}
