//! In-memory storage backend.
//!
//! Records of every tenant live in one shared [`DashMap`] keyed by
//! `(tenant, issuer)`. Handles returned by [`InMemoryTenantResolver`] are
//! cheap views bound to one tenant; they only ever read or write keys carrying
//! their own tenant.
//!
//! State is not durable and is lost when the last handle and resolver are
//! dropped. Intended for tests and single-process deployments.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sp_model::{SamlServiceProvider, TenantId};

use crate::error::{StorageError, StorageResult};
use crate::repository::ServiceProviderRepository;
use crate::tenant::TenantRepositoryResolver;

const ENTITY: &str = "ServiceProvider";

type RecordKey = (TenantId, String);
type SharedRecords = Arc<DashMap<RecordKey, SamlServiceProvider>>;

/// Resolver handing out in-memory repository handles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTenantResolver {
    records: SharedRecords,
    /// When set, only these tenants resolve.
    tenants: Option<Arc<HashSet<TenantId>>>,
}

impl InMemoryTenantResolver {
    /// Creates a resolver that accepts every tenant.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that only resolves the given tenants.
    #[must_use]
    pub fn with_tenants(tenants: impl IntoIterator<Item = TenantId>) -> Self {
        Self {
            records: SharedRecords::default(),
            tenants: Some(Arc::new(tenants.into_iter().collect())),
        }
    }

    /// Returns a handle bound to the tenant without checking the tenant list.
    #[must_use]
    pub fn repository(&self, tenant_id: TenantId) -> InMemoryServiceProviderRepository {
        InMemoryServiceProviderRepository {
            tenant_id,
            records: Arc::clone(&self.records),
        }
    }

    /// Total number of records across all tenants.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl TenantRepositoryResolver for InMemoryTenantResolver {
    async fn resolve(
        &self,
        tenant_id: TenantId,
    ) -> StorageResult<Box<dyn ServiceProviderRepository>> {
        if let Some(tenants) = &self.tenants {
            if !tenants.contains(&tenant_id) {
                return Err(StorageError::TenantUnavailable(tenant_id));
            }
        }
        Ok(Box::new(self.repository(tenant_id)))
    }
}

/// In-memory repository handle bound to one tenant.
#[derive(Debug, Clone)]
pub struct InMemoryServiceProviderRepository {
    tenant_id: TenantId,
    records: SharedRecords,
}

impl InMemoryServiceProviderRepository {
    fn key(&self, issuer: &str) -> RecordKey {
        (self.tenant_id, issuer.to_string())
    }

    /// Copies the record with the owning tenant forced to this handle's tenant.
    fn owned(&self, service_provider: &SamlServiceProvider) -> SamlServiceProvider {
        let mut record = service_provider.clone();
        record.tenant_id = self.tenant_id;
        record
    }
}

#[async_trait]
impl ServiceProviderRepository for InMemoryServiceProviderRepository {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    async fn add(&self, service_provider: &SamlServiceProvider) -> StorageResult<()> {
        match self.records.entry(self.key(&service_provider.issuer)) {
            Entry::Occupied(_) => Err(StorageError::duplicate(
                ENTITY,
                self.tenant_id,
                "issuer",
                &service_provider.issuer,
            )),
            Entry::Vacant(slot) => {
                slot.insert(self.owned(service_provider));
                tracing::trace!(tenant_id = %self.tenant_id, issuer = %service_provider.issuer, "Stored service provider");
                Ok(())
            }
        }
    }

    async fn update(&self, service_provider: &SamlServiceProvider) -> StorageResult<()> {
        match self.records.get_mut(&self.key(&service_provider.issuer)) {
            Some(mut existing) => {
                *existing = self.owned(service_provider);
                Ok(())
            }
            None => Err(StorageError::not_found(
                ENTITY,
                self.tenant_id,
                &service_provider.issuer,
            )),
        }
    }

    async fn get_all(&self) -> StorageResult<Vec<SamlServiceProvider>> {
        let mut records: Vec<SamlServiceProvider> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == self.tenant_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| a.issuer.cmp(&b.issuer));
        Ok(records)
    }

    async fn get_by_issuer(&self, issuer: &str) -> StorageResult<Option<SamlServiceProvider>> {
        Ok(self
            .records
            .get(&self.key(issuer))
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, issuer: &str) -> StorageResult<bool> {
        Ok(self.records.contains_key(&self.key(issuer)))
    }

    async fn remove(&self, issuer: &str) -> StorageResult<bool> {
        Ok(self.records.remove(&self.key(issuer)).is_some())
    }

    async fn count(&self) -> StorageResult<u64> {
        let count = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == self.tenant_id)
            .count();
        Ok(count as u64)
    }
}
