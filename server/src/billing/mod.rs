//! Split-Bill Settlement
//!
//! Validates shares against the authoritative order total, tracks per-payer
//! paid flags, and completes the order atomically when the last share lands.

mod settlement;

pub use settlement::{SettlementEngine, ShareSettlement};
