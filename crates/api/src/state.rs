use std::sync::Arc;

use dbz_catalog::CatalogApi;
use dbz_db::DbPool;
use dbz_sync::Synchronizer;

use crate::config::ServerConfig;

/// The one synchronizer the service runs, reading the live catalog and
/// writing to PostgreSQL.
pub type CatalogSynchronizer = Synchronizer<CatalogApi, DbPool>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration (JWT settings and login credentials).
    pub config: Arc<ServerConfig>,
    /// Shared so that concurrent sync requests contend on the same guard.
    pub synchronizer: Arc<CatalogSynchronizer>,
}

impl AppState {
    /// Wire a synchronizer over `pool` and a catalog client built from config.
    pub fn new(pool: DbPool, config: ServerConfig, catalog: CatalogApi) -> Self {
        let synchronizer =
            Synchronizer::new(catalog, pool.clone()).with_page_limit(config.catalog.page_limit);

        Self {
            pool,
            config: Arc::new(config),
            synchronizer: Arc::new(synchronizer),
        }
    }
}
