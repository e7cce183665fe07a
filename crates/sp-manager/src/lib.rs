//! # sp-manager
//!
//! Tenant-scoped management of SAML service provider configurations.
//!
//! [`ServiceProviderManager`] is the single entry point for adding, updating,
//! listing, fetching, checking, removing and uploading service provider
//! records. Each call resolves a fresh repository handle for the tenant it
//! names, translates storage and metadata failures into [`ManagerError`],
//! and records configuration changes on the audit log.
//!
//! ## Usage
//!
//! ```ignore
//! use sp_core::Config;
//! use sp_manager::bootstrap;
//!
//! let config = Config::from_env()?;
//! let manager = bootstrap::connect(&config).await?;
//! let providers = manager.get_service_providers(tenant_id).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bootstrap;
pub mod error;
pub mod manager;

pub use error::{ErrorKind, ManagerError, ManagerResult, Operation};
pub use manager::ServiceProviderManager;
