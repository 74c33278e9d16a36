use crate::billing::SettlementEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::message::MessageBus;
use crate::orders::OrderEngine;
use crate::utils::{AppError, AppResult};
use shared::message::BusMessage;

/// Server state — shared handles for every request
///
/// Cloning is cheap: the pool, the bus, and the engines all share their
/// underlying resources through `Arc`s.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable configuration |
/// | db | SQLite pool and migrations |
/// | bus | Broadcast fan-out to terminals |
/// | orders | Order lifecycle engine |
/// | billing | Split-bill settlement engine |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub bus: MessageBus,
    pub orders: OrderEngine,
    pub billing: SettlementEngine,
}

impl ServerState {
    /// Initialize the full state: work directory, database, bus, engines
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("comanda.db");
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let bus = MessageBus::with_capacity(config.bus_capacity);
        let orders = OrderEngine::new(db.pool.clone(), bus.clone());
        let billing = SettlementEngine::new(db.pool.clone(), bus.clone());

        Ok(Self {
            config: config.clone(),
            db,
            bus,
            orders,
            billing,
        })
    }

    /// Broadcast an entity CRUD change (`<resource>_<action>`)
    ///
    /// `data` is the entity on create/update and `None` on delete.
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: i64,
        data: Option<&T>,
    ) {
        self.bus.publish(BusMessage::sync(resource, action, id, data));
    }
}
