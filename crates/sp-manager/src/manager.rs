//! Service provider manager.

use std::sync::Arc;

use sp_core::event::{Event, EventType};
use sp_metadata::MetadataImporter;
use sp_model::{SamlServiceProvider, TenantId};
use sp_storage::{ServiceProviderRepository, StorageError, TenantRepositoryResolver};

use crate::error::{ManagerError, ManagerResult, Operation};

/// Manages the SAML service provider configurations of all tenants.
///
/// The manager holds no per-tenant state. Every call resolves one repository
/// handle for the tenant it names and drops it before returning, so a single
/// instance can be shared freely across tasks and tenants.
#[derive(Clone)]
pub struct ServiceProviderManager {
    resolver: Arc<dyn TenantRepositoryResolver>,
    importer: Arc<dyn MetadataImporter>,
}

impl std::fmt::Debug for ServiceProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProviderManager").finish_non_exhaustive()
    }
}

impl ServiceProviderManager {
    /// Creates a manager over the given resolver and metadata importer.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn TenantRepositoryResolver>,
        importer: Arc<dyn MetadataImporter>,
    ) -> Self {
        Self { resolver, importer }
    }

    /// Adds a service provider to the tenant.
    ///
    /// The record is stored under `tenant_id` regardless of the tenant it
    /// carries. Other fields are stored exactly as given.
    ///
    /// ## Errors
    ///
    /// - `InvalidRecord` if the record fails validation
    /// - `Conflict` if the issuer already exists in the tenant
    /// - `AccessFailure` if storage cannot be reached
    pub async fn add_service_provider(
        &self,
        service_provider: SamlServiceProvider,
        tenant_id: TenantId,
    ) -> ManagerResult<bool> {
        let record = prepare(service_provider, tenant_id, EventType::ServiceProviderAdded)?;
        let repository = self.repository(Operation::Add, tenant_id).await?;

        store(repository.as_ref(), &record, Operation::Add).await?;

        Event::builder(EventType::ServiceProviderAdded)
            .tenant(tenant_id)
            .issuer(&record.issuer)
            .detail("acs_urls", record.assertion_consumer_urls.len().to_string())
            .build()
            .emit();
        Ok(true)
    }

    /// Replaces an existing service provider in the tenant.
    ///
    /// Every field is overwritten; fields absent from the new record are
    /// cleared.
    ///
    /// ## Errors
    ///
    /// - `InvalidRecord` if the record fails validation
    /// - `NotFound` if the issuer does not exist in the tenant
    /// - `AccessFailure` if storage cannot be reached
    pub async fn update_service_provider(
        &self,
        service_provider: SamlServiceProvider,
        tenant_id: TenantId,
    ) -> ManagerResult<bool> {
        let record = prepare(service_provider, tenant_id, EventType::ServiceProviderUpdated)?;
        let repository = self.repository(Operation::Update, tenant_id).await?;

        match repository.update(&record).await {
            Ok(()) => {}
            Err(StorageError::NotFound { .. }) => {
                tracing::debug!(
                    tenant_id = %tenant_id,
                    issuer = %record.issuer,
                    "Service provider to update does not exist"
                );
                Event::builder(EventType::ServiceProviderUpdated)
                    .failure("service provider does not exist")
                    .tenant(tenant_id)
                    .issuer(&record.issuer)
                    .build()
                    .emit();
                return Err(ManagerError::NotFound {
                    tenant_id,
                    issuer: record.issuer,
                });
            }
            Err(err) => return Err(access_failure(Operation::Update, tenant_id, err)),
        }

        Event::builder(EventType::ServiceProviderUpdated)
            .tenant(tenant_id)
            .issuer(&record.issuer)
            .build()
            .emit();
        Ok(true)
    }

    /// Returns every service provider of the tenant, ordered by issuer.
    ///
    /// ## Errors
    ///
    /// Returns `AccessFailure` if storage cannot be reached.
    pub async fn get_service_providers(
        &self,
        tenant_id: TenantId,
    ) -> ManagerResult<Vec<SamlServiceProvider>> {
        let repository = self.repository(Operation::List, tenant_id).await?;
        repository
            .get_all()
            .await
            .map_err(|err| access_failure(Operation::List, tenant_id, err))
    }

    /// Returns the tenant's service provider with the issuer, if any.
    ///
    /// ## Errors
    ///
    /// Returns `AccessFailure` if storage cannot be reached.
    pub async fn get_service_provider(
        &self,
        issuer: &str,
        tenant_id: TenantId,
    ) -> ManagerResult<Option<SamlServiceProvider>> {
        let repository = self.repository(Operation::Get, tenant_id).await?;
        repository
            .get_by_issuer(issuer)
            .await
            .map_err(|err| access_failure(Operation::Get, tenant_id, err))
    }

    /// Returns true if the tenant has a service provider with the issuer.
    ///
    /// ## Errors
    ///
    /// Returns `AccessFailure` if storage cannot be reached.
    pub async fn is_service_provider_exists(
        &self,
        issuer: &str,
        tenant_id: TenantId,
    ) -> ManagerResult<bool> {
        let repository = self.repository(Operation::Exists, tenant_id).await?;
        repository
            .exists(issuer)
            .await
            .map_err(|err| access_failure(Operation::Exists, tenant_id, err))
    }

    /// Removes the tenant's service provider with the issuer.
    ///
    /// Returns false if there was nothing to remove.
    ///
    /// ## Errors
    ///
    /// Returns `AccessFailure` if storage cannot be reached.
    pub async fn remove_service_provider(
        &self,
        issuer: &str,
        tenant_id: TenantId,
    ) -> ManagerResult<bool> {
        let repository = self.repository(Operation::Remove, tenant_id).await?;
        let removed = repository
            .remove(issuer)
            .await
            .map_err(|err| access_failure(Operation::Remove, tenant_id, err))?;

        if removed {
            Event::builder(EventType::ServiceProviderRemoved)
                .tenant(tenant_id)
                .issuer(issuer)
                .build()
                .emit();
        } else {
            tracing::debug!(tenant_id = %tenant_id, issuer = %issuer, "No service provider to remove");
        }
        Ok(removed)
    }

    /// Creates a service provider from a SAML metadata document.
    ///
    /// Nothing is written unless the document is accepted in full. An issuer
    /// that already exists is not overwritten.
    ///
    /// ## Errors
    ///
    /// - `InvalidMetadata` if the document is rejected
    /// - `Conflict` if the issuer already exists in the tenant
    /// - `AccessFailure` if storage cannot be reached
    pub async fn upload_service_provider(
        &self,
        metadata: &str,
        tenant_id: TenantId,
    ) -> ManagerResult<SamlServiceProvider> {
        let record = match self.importer.import(metadata, tenant_id) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    error = %err,
                    "Rejected service provider metadata"
                );
                Event::builder(EventType::ServiceProviderUploaded)
                    .failure(err.to_string())
                    .tenant(tenant_id)
                    .build()
                    .emit();
                return Err(ManagerError::InvalidMetadata {
                    tenant_id,
                    source: err,
                });
            }
        };

        let repository = self.repository(Operation::Upload, tenant_id).await?;
        store(repository.as_ref(), &record, Operation::Upload).await?;

        Event::builder(EventType::ServiceProviderUploaded)
            .tenant(tenant_id)
            .issuer(&record.issuer)
            .detail("acs_urls", record.assertion_consumer_urls.len().to_string())
            .detail(
                "signing_certificate",
                record.signing_certificate.is_some().to_string(),
            )
            .build()
            .emit();
        Ok(record)
    }

    async fn repository(
        &self,
        operation: Operation,
        tenant_id: TenantId,
    ) -> ManagerResult<Box<dyn ServiceProviderRepository>> {
        self.resolver
            .resolve(tenant_id)
            .await
            .map_err(|err| access_failure(operation, tenant_id, err))
    }
}

/// Stamps the tenant onto a record and validates it before a write.
fn prepare(
    mut service_provider: SamlServiceProvider,
    tenant_id: TenantId,
    event_type: EventType,
) -> ManagerResult<SamlServiceProvider> {
    service_provider.tenant_id = tenant_id;

    if let Err(reason) = service_provider.validate() {
        tracing::warn!(
            tenant_id = %tenant_id,
            issuer = %service_provider.issuer,
            reason = %reason,
            "Rejected invalid service provider"
        );
        Event::builder(event_type)
            .failure(reason.clone())
            .tenant(tenant_id)
            .issuer(&service_provider.issuer)
            .build()
            .emit();
        return Err(ManagerError::InvalidRecord {
            issuer: service_provider.issuer,
            reason,
        });
    }
    Ok(service_provider)
}

/// Inserts a new record, reporting an existing issuer as a conflict.
async fn store(
    repository: &dyn ServiceProviderRepository,
    record: &SamlServiceProvider,
    operation: Operation,
) -> ManagerResult<()> {
    let tenant_id = repository.tenant_id();
    match repository.add(record).await {
        Ok(()) => Ok(()),
        Err(StorageError::Duplicate { .. }) => {
            tracing::debug!(
                tenant_id = %tenant_id,
                issuer = %record.issuer,
                operation = operation.as_str(),
                "Service provider already exists"
            );
            let event_type = match operation {
                Operation::Upload => EventType::ServiceProviderUploaded,
                _ => EventType::ServiceProviderAdded,
            };
            Event::builder(event_type)
                .failure("service provider already exists")
                .tenant(tenant_id)
                .issuer(&record.issuer)
                .build()
                .emit();
            Err(ManagerError::Conflict {
                tenant_id,
                issuer: record.issuer.clone(),
            })
        }
        Err(err) => Err(access_failure(operation, tenant_id, err)),
    }
}

/// Logs a storage failure and wraps it as `AccessFailure`.
fn access_failure(operation: Operation, tenant_id: TenantId, err: StorageError) -> ManagerError {
    tracing::error!(
        tenant_id = %tenant_id,
        operation = operation.as_str(),
        error = %err,
        "Error while {operation}"
    );
    ManagerError::AccessFailure {
        operation,
        tenant_id,
        source: Box::new(err),
    }
}
