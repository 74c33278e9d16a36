//! Comanda Server - restaurant QR-ordering backend
//!
//! # Architecture overview
//!
//! - **HTTP API** (`api`): RESTful routes over axum
//! - **Order engine** (`orders`): order/item lifecycle and derived totals
//! - **Settlement engine** (`billing`): payments and split bills
//! - **Message bus** (`message`): WebSocket fan-out to terminals
//! - **Database** (`db`): embedded SQLite (WAL) via sqlx
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── api/           # routes and handlers
//! ├── orders/        # order lifecycle engine
//! ├── billing/       # split-bill settlement engine
//! ├── message/       # broadcast bus + WebSocket
//! ├── db/            # pool, migrations, models, repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod message;
pub mod orders;
pub mod utils;

pub use billing::SettlementEngine;
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use message::MessageBus;
pub use orders::OrderEngine;
pub use utils::{ApiError, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::init_logger_with_file;

/// Load .env, ensure the work directory, and initialize logging
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    config.ensure_work_dir_structure()?;
    let log_dir = config.log_dir();
    init_logger_with_file(Some(&config.log_level), log_dir.to_str());
    Ok(())
}
