//! Tenant resolver backed by a shared connection pool.

use async_trait::async_trait;
use sp_model::TenantId;
use sp_storage::error::{StorageError, StorageResult};
use sp_storage::{ServiceProviderRepository, TenantRepositoryResolver};
use sqlx::PgPool;

use crate::repository::PgServiceProviderRepository;

/// Hands out repository handles sharing one `PostgreSQL` pool.
///
/// Handles are cheap: each holds a clone of the pool and the tenant it was
/// resolved for.
#[derive(Debug, Clone)]
pub struct PgTenantResolver {
    pool: PgPool,
}

impl PgTenantResolver {
    /// Creates a resolver over the pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TenantRepositoryResolver for PgTenantResolver {
    async fn resolve(
        &self,
        tenant_id: TenantId,
    ) -> StorageResult<Box<dyn ServiceProviderRepository>> {
        if self.pool.is_closed() {
            return Err(StorageError::Connection("Connection pool closed".to_string()));
        }
        tracing::trace!(tenant_id = %tenant_id, "Resolved service provider repository");
        Ok(Box::new(PgServiceProviderRepository::new(
            self.pool.clone(),
            tenant_id,
        )))
    }
}
