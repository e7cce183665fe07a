//! Service provider repository trait.

use async_trait::async_trait;
use sp_model::{SamlServiceProvider, TenantId};

use crate::error::StorageResult;

/// Repository for one tenant's service provider records.
///
/// A handle is bound to a single tenant at construction time and every
/// operation is scoped to that tenant. Records are keyed by issuer.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait ServiceProviderRepository: Send + Sync {
    /// Returns the tenant this handle is bound to.
    fn tenant_id(&self) -> TenantId;

    /// Stores a new record.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a record with the same issuer exists.
    /// Of several concurrent calls for one issuer at most one succeeds.
    async fn add(&self, service_provider: &SamlServiceProvider) -> StorageResult<()>;

    /// Replaces an existing record with the given state.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if no record with the issuer exists.
    async fn update(&self, service_provider: &SamlServiceProvider) -> StorageResult<()>;

    /// Gets all records, ordered by issuer.
    async fn get_all(&self) -> StorageResult<Vec<SamlServiceProvider>>;

    /// Gets a record by issuer.
    async fn get_by_issuer(&self, issuer: &str) -> StorageResult<Option<SamlServiceProvider>>;

    /// Checks whether a record with the issuer exists.
    async fn exists(&self, issuer: &str) -> StorageResult<bool>;

    /// Removes a record by issuer.
    ///
    /// Returns true if a record existed.
    async fn remove(&self, issuer: &str) -> StorageResult<bool>;

    /// Counts the records.
    async fn count(&self) -> StorageResult<u64>;
}
