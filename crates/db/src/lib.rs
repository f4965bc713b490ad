//! Persistence for the product catalog: pool setup, migrations, the
//! [`ProductStore`] trait with its PostgreSQL and in-memory implementations,
//! and the [`ProductCatalog`] operations built on top of them.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod catalog;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use catalog::ProductCatalog;
pub use error::{CatalogError, CatalogResult};
pub use memory::InMemoryProductStore;
pub use repositories::PgProductStore;
pub use store::ProductStore;

pub type DbPool = sqlx::PgPool;

/// Connection pool sizing.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    /// How long a statement waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial statement to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
