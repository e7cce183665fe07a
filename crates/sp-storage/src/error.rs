//! Storage error types.

use sp_model::TenantId;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} '{key}' in tenant {tenant_id}")]
    NotFound {
        /// Type of entity (e.g., "ServiceProvider").
        entity_type: &'static str,
        /// Tenant that was searched.
        tenant_id: TenantId,
        /// Entity key.
        key: String,
    },

    /// Duplicate entity (unique constraint violation).
    #[error("Duplicate {entity_type}: {field} '{value}' already exists in tenant {tenant_id}")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Tenant holding the existing entity.
        tenant_id: TenantId,
        /// Field that caused the conflict.
        field: &'static str,
        /// Conflicting value.
        value: String,
    },

    /// The tenant's configuration store could not be resolved.
    #[error("Tenant {0} is not available")]
    TenantUnavailable(TenantId),

    /// Invalid data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Database query error.
    #[error("Database query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a not found error for an entity.
    #[must_use]
    pub fn not_found(entity_type: &'static str, tenant_id: TenantId, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            tenant_id,
            key: key.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(
        entity_type: &'static str,
        tenant_id: TenantId,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::Duplicate {
            entity_type,
            tenant_id,
            field,
            value: value.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
