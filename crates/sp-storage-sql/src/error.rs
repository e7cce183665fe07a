//! SQL storage error types.

use sp_model::TenantId;
use sp_storage::StorageError;
use sqlx::Error as SqlxError;

/// `PostgreSQL` unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Converts a `SQLx` error to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::RowNotFound => StorageError::Internal("Row not found".to_string()),
        SqlxError::Database(db_err) => StorageError::Query(db_err.to_string()),
        SqlxError::PoolTimedOut => StorageError::Connection("Connection pool timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Connection("Connection pool closed".to_string()),
        SqlxError::Io(io_err) => StorageError::Connection(io_err.to_string()),
        SqlxError::Tls(tls_err) => StorageError::Connection(tls_err.to_string()),
        SqlxError::ColumnDecode { .. } | SqlxError::Decode(_) => {
            StorageError::Serialization(err.to_string())
        }
        _ => StorageError::Internal(err.to_string()),
    }
}

/// Converts an insert error, reporting a primary key collision as a duplicate.
pub fn from_insert_error(err: SqlxError, tenant_id: TenantId, issuer: &str) -> StorageError {
    if is_unique_violation(&err) {
        return StorageError::duplicate(ENTITY, tenant_id, "issuer", issuer);
    }
    from_sqlx_error(err)
}

/// Returns true if the error is a unique constraint violation.
pub fn is_unique_violation(err: &SqlxError) -> bool {
    match err {
        SqlxError::Database(db_err) => db_err.code().is_some_and(|c| c == UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Entity name used in storage errors.
pub const ENTITY: &str = "ServiceProvider";
