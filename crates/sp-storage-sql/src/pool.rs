//! Connection pool and schema setup.

use std::time::Duration;

use sp_core::config::DatabaseConfig;
use sp_storage::StorageError;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Builds the pool options for the configured limits.
///
/// Zero idle timeout or lifetime leaves the corresponding limit unset.
#[must_use]
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(limit(config.idle_timeout_secs))
        .max_lifetime(limit(config.max_lifetime_secs))
}

/// Connects a `PostgreSQL` pool for the registry.
///
/// # Errors
///
/// Returns `StorageError::Connection` if the database cannot be reached.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, StorageError> {
    let pool = pool_options(config)
        .connect(&config.url)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
    tracing::debug!(
        max_connections = config.max_connections,
        idle_timeout_secs = config.idle_timeout_secs,
        max_lifetime_secs = config.max_lifetime_secs,
        "Connected service provider database pool"
    );
    Ok(pool)
}

/// Applies pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Internal(format!("Migration failed: {e}")))?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

fn limit(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
