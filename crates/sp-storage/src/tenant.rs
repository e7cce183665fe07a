//! Tenant-scoped repository resolution.

use async_trait::async_trait;
use sp_model::TenantId;

use crate::error::StorageResult;
use crate::repository::ServiceProviderRepository;

/// Resolves a repository handle bound to one tenant's configuration store.
///
/// Each call returns a new handle. Callers must not keep a handle beyond the
/// operation it was resolved for.
#[async_trait]
pub trait TenantRepositoryResolver: Send + Sync {
    /// Resolves a repository for the tenant.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::TenantUnavailable` if the tenant's store cannot be
    /// reached, or a connection error from the backend.
    async fn resolve(
        &self,
        tenant_id: TenantId,
    ) -> StorageResult<Box<dyn ServiceProviderRepository>>;
}
