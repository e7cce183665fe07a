//! # sp-storage-sql
//!
//! `PostgreSQL` storage for SAML service provider records using `SQLx`.
//!
//! All tenants share the `saml_service_providers` table keyed by
//! `(tenant_id, issuer)`. Every statement issued by a
//! [`PgServiceProviderRepository`] is filtered by the tenant the handle was
//! resolved for.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod convert;
pub mod entities;
pub mod error;
pub mod pool;
pub mod repository;
pub mod resolver;

pub use pool::{MIGRATOR, create_pool, pool_options, run_migrations};
pub use repository::PgServiceProviderRepository;
pub use resolver::PgTenantResolver;
