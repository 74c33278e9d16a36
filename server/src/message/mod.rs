//! Real-time event fan-out
//!
//! Engines publish [`shared::message::BusMessage`] envelopes onto the
//! [`MessageBus`]; each connected WebSocket terminal holds its own broadcast
//! subscription.

mod bus;
mod ws;

pub use bus::{ConnectedTerminal, MessageBus};
pub use ws::ws_handler;
