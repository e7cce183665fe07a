//! Manager error types.
//!
//! Callers branch on [`ErrorKind`]; the underlying cause is kept as the
//! error source and rendered by [`ManagerError::cause_chain`].

use std::error::Error as StdError;
use std::fmt;

use sp_metadata::MetadataError;
use sp_model::TenantId;
use thiserror::Error;

/// Boxed underlying cause.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Manager operations, used in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `add_service_provider`.
    Add,
    /// `update_service_provider`.
    Update,
    /// `get_service_providers`.
    List,
    /// `get_service_provider`.
    Get,
    /// `is_service_provider_exists`.
    Exists,
    /// `remove_service_provider`.
    Remove,
    /// `upload_service_provider`.
    Upload,
}

impl Operation {
    /// Short name used as a structured log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::List => "list",
            Self::Get => "get",
            Self::Exists => "exists",
            Self::Remove => "remove",
            Self::Upload => "upload",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "adding service provider",
            Self::Update => "updating service provider",
            Self::List => "retrieving service providers",
            Self::Get => "retrieving service provider",
            Self::Exists => "checking service provider existence",
            Self::Remove => "removing service provider",
            Self::Upload => "uploading service provider metadata",
        })
    }
}

/// Failure categories of manager operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Storage or tenant resolution failed.
    AccessFailure,
    /// No record with the issuer exists in the tenant.
    NotFound,
    /// A record with the issuer already exists in the tenant.
    Conflict,
    /// The metadata document was rejected.
    InvalidMetadata,
    /// The record failed validation.
    InvalidRecord,
}

/// Errors returned by [`ServiceProviderManager`](crate::ServiceProviderManager).
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Storage or tenant resolution failed.
    #[error("error while {operation} for tenant {tenant_id}")]
    AccessFailure {
        /// Operation that failed.
        operation: Operation,
        /// Tenant the operation ran for.
        tenant_id: TenantId,
        /// Underlying storage error.
        #[source]
        source: BoxError,
    },

    /// No record with the issuer exists in the tenant.
    #[error("service provider '{issuer}' does not exist in tenant {tenant_id}")]
    NotFound {
        /// Tenant that was searched.
        tenant_id: TenantId,
        /// Requested issuer.
        issuer: String,
    },

    /// A record with the issuer already exists in the tenant.
    #[error("service provider '{issuer}' already exists in tenant {tenant_id}")]
    Conflict {
        /// Tenant holding the existing record.
        tenant_id: TenantId,
        /// Conflicting issuer.
        issuer: String,
    },

    /// The metadata document was rejected.
    #[error("invalid service provider metadata for tenant {tenant_id}")]
    InvalidMetadata {
        /// Tenant the upload was for.
        tenant_id: TenantId,
        /// Reason for rejection.
        #[source]
        source: MetadataError,
    },

    /// The record failed validation.
    #[error("invalid service provider '{issuer}': {reason}")]
    InvalidRecord {
        /// Issuer of the rejected record.
        issuer: String,
        /// Violated constraint.
        reason: String,
    },
}

impl ManagerError {
    /// Returns the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AccessFailure { .. } => ErrorKind::AccessFailure,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::InvalidMetadata { .. } => ErrorKind::InvalidMetadata,
            Self::InvalidRecord { .. } => ErrorKind::InvalidRecord,
        }
    }

    /// Renders this error and its sources, outermost first, joined by `: `.
    #[must_use]
    pub fn cause_chain(&self) -> String {
        let mut chain = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        chain
    }
}
