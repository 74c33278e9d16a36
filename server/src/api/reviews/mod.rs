//! Dish Review API module

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/menu-item/{id}", get(handler::list_for_menu_item))
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
}
