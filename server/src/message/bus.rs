//! Message bus core
//!
//! # Message flow
//!
//! ```text
//! Engines ──▶ publish() ──▶ server_tx ──▶ connected terminals (WebSocket)
//! ```
//!
//! Delivery is at-most-once: the broadcast channel drops the oldest messages
//! for a lagging subscriber, and a closed socket is skipped, never retried.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shared::message::BusMessage;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Default capacity of the broadcast channel
const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// A terminal currently subscribed over WebSocket
#[derive(Debug, Clone)]
pub struct ConnectedTerminal {
    pub id: u64,
    pub addr: Option<SocketAddr>,
}

/// Message bus — fans engine events out to connected terminals
///
/// Cloning is cheap; all clones share the same channel and registry.
#[derive(Debug, Clone)]
pub struct MessageBus {
    /// Server-to-terminal broadcast channel
    server_tx: broadcast::Sender<BusMessage>,
    /// Connected terminals (terminal id -> metadata)
    clients: Arc<DashMap<u64, ConnectedTerminal>>,
    next_id: Arc<AtomicU64>,
    /// Shutdown signal token
    shutdown_token: CancellationToken,
}

impl MessageBus {
    /// Create a message bus with the default channel capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a message bus with the given channel capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (server_tx, _) = broadcast::channel(capacity);
        Self {
            server_tx,
            clients: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Publish a message to all subscribed terminals
    ///
    /// Fire-and-forget: with no terminals connected the message is dropped,
    /// which is not an error. Mutations must already be committed before
    /// their event is published.
    pub fn publish(&self, msg: BusMessage) {
        match self.server_tx.send(msg) {
            Ok(receivers) => {
                tracing::debug!(receivers, "Broadcast message published");
            }
            Err(broadcast::error::SendError(msg)) => {
                tracing::debug!(event = %msg.event, "No terminals connected, message dropped");
            }
        }
    }

    /// Subscribe to the server broadcast
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.server_tx.subscribe()
    }

    /// Register a newly connected terminal, returning its id
    pub fn register(&self, addr: Option<SocketAddr>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.clients.insert(id, ConnectedTerminal { id, addr });
        tracing::info!(terminal_id = id, ?addr, "Terminal connected");
        id
    }

    /// Remove a terminal from the registry
    pub fn unregister(&self, id: u64) {
        if self.clients.remove(&id).is_some() {
            tracing::info!(terminal_id = id, "Terminal disconnected");
        }
    }

    /// Snapshot of currently connected terminals
    pub fn connected_terminals(&self) -> Vec<ConnectedTerminal> {
        self.clients.iter().map(|e| e.value().clone()).collect()
    }

    /// Token observed by terminal tasks for graceful shutdown
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Gracefully shut down the bus, closing all terminal tasks
    pub fn shutdown(&self) {
        tracing::info!("Shutting down message bus");
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
