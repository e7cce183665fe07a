//! # sp-storage
//!
//! Storage abstraction traits for the SAML service provider registry.
//!
//! This crate defines the repository interface that concrete storage
//! backends implement, and the resolver that hands out repository handles
//! bound to a single tenant.
//!
//! ## Traits
//!
//! - [`ServiceProviderRepository`] - CRUD operations for one tenant's records
//! - [`TenantRepositoryResolver`] - builds a fresh tenant-bound repository handle
//!
//! An in-memory backend lives in [`memory`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod memory;
pub mod repository;
pub mod tenant;

pub use error::{StorageError, StorageResult};
pub use repository::ServiceProviderRepository;
pub use tenant::TenantRepositoryResolver;
