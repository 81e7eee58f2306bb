use std::sync::Arc;

use fwip_core::catalog::CatalogStore;
use fwip_core::console::ModerationConsole;
use fwip_core::moderation::ModerationQueue;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and every collaborator sit behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: fwip_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Where approved changes are written.
    pub catalog: Arc<dyn CatalogStore>,
    /// Pending change-requests.
    pub queue: Arc<dyn ModerationQueue>,
}

impl AppState {
    /// Build state over the local Postgres catalog and queue.
    pub fn local(pool: fwip_db::DbPool, config: ServerConfig) -> Self {
        Self {
            catalog: Arc::new(fwip_db::stores::PgCatalogStore::new(pool.clone())),
            queue: Arc::new(fwip_db::stores::PgModerationQueue::new(pool.clone())),
            pool,
            config: Arc::new(config),
        }
    }

    /// Swap the catalog, keeping everything else.
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogStore>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Console over this state's queue and catalog.
    pub fn console(&self) -> ModerationConsole {
        ModerationConsole::new(Arc::clone(&self.queue), Arc::clone(&self.catalog))
    }
}
