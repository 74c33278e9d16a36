//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
    pub connected_terminals: usize,
}

/// GET /api/health - liveness probe with basic runtime info
pub async fn health(State(state): State<ServerState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        environment: state.config.environment.clone(),
        connected_terminals: state.bus.connected_terminals().len(),
    })
}
