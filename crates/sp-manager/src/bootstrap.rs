//! Wiring of a manager from configuration.

use std::sync::Arc;

use sp_core::Config;
use sp_metadata::{ImportConfig, SamlMetadataImporter};
use sp_storage::memory::InMemoryTenantResolver;
use sp_storage_sql::{PgTenantResolver, create_pool, run_migrations};

use crate::manager::ServiceProviderManager;

/// Connects to `PostgreSQL`, applies migrations and builds a manager.
///
/// ## Errors
///
/// Returns an error if the pool cannot be created or a migration fails.
pub async fn connect(config: &Config) -> anyhow::Result<ServiceProviderManager> {
    let pool = create_pool(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database connection pool created"
    );

    run_migrations(&pool).await?;

    Ok(ServiceProviderManager::new(
        Arc::new(PgTenantResolver::new(pool)),
        Arc::new(importer(config)),
    ))
}

/// Loads configuration from the environment, installs logging and connects.
///
/// ## Errors
///
/// Returns an error if configuration is invalid, logging is already
/// installed, or [`connect`] fails.
pub async fn from_env() -> anyhow::Result<ServiceProviderManager> {
    let config = Config::from_env()?;
    sp_core::telemetry::init(&config.log)?;
    tracing::info!(
        require_signed = config.metadata.require_signed,
        "Starting service provider registry"
    );
    connect(&config).await
}

/// Builds a manager backed by process memory.
#[must_use]
pub fn in_memory(config: &Config) -> ServiceProviderManager {
    ServiceProviderManager::new(
        Arc::new(InMemoryTenantResolver::new()),
        Arc::new(importer(config)),
    )
}

fn importer(config: &Config) -> SamlMetadataImporter {
    SamlMetadataImporter::new(ImportConfig::from(&config.metadata))
}
