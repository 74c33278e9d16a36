//! Payment and Split-Bill API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::record_payment))
        .route("/split", post(handler::create_split_bill))
        .route("/shares/{id}/pay", post(handler::pay_share))
        .route("/order/{order_id}", get(handler::get_by_order))
}
