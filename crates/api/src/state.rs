use std::sync::Arc;

use forestal_db::ProductStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used for health checks.
    pub pool: forestal_db::DbPool,
    /// Product store the catalog operations run against.
    pub products: Arc<dyn ProductStore>,
    pub config: Arc<ServerConfig>,
}
