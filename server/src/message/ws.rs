//! WebSocket fan-out for connected terminals
//!
//! Terminals (kitchen displays, waiter handhelds, customer phones) connect
//! to `GET /ws` and receive every [`BusMessage`] published after their
//! subscription. One task per socket; a slow or closed terminal never blocks
//! the others.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

/// GET /ws — upgrade to WebSocket and start streaming events
pub async fn ws_handler(
    State(state): State<ServerState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_terminal(socket, state, addr))
}

async fn handle_terminal(socket: WebSocket, state: ServerState, addr: SocketAddr) {
    let bus = state.bus.clone();
    let terminal_id = bus.register(Some(addr));
    let mut rx = bus.subscribe();
    let shutdown = bus.shutdown_token().clone();

    let (mut ws_sink, mut ws_stream) = socket.split();

    loop {
        tokio::select! {
            // Bus event to push to this terminal
            msg = rx.recv() => {
                match msg {
                    Ok(bus_msg) => {
                        let json = match serde_json::to_string(&bus_msg) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::warn!(terminal_id, "Failed to encode bus message: {e}");
                                continue;
                            }
                        };
                        if ws_sink.send(Message::Text(json.into())).await.is_err() {
                            tracing::debug!(terminal_id, "Terminal socket closed, stopping push");
                            break;
                        }
                    }
                    // At-most-once: dropped messages are not replayed
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(terminal_id, skipped, "Terminal lagged, messages dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            // Incoming frame from the terminal
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::warn!(terminal_id, "WebSocket error: {e}");
                        break;
                    }
                    // Terminals are receive-only; text/binary frames are ignored
                    _ => {}
                }
            }

            _ = shutdown.cancelled() => {
                tracing::debug!(terminal_id, "Shutdown requested, closing terminal socket");
                break;
            }
        }
    }

    let _ = ws_sink.close().await;
    bus.unregister(terminal_id);
}
