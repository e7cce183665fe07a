//! # sp-model
//!
//! Domain models for the SAML service provider registry.
//!
//! This crate defines the configuration record describing how one external
//! application authenticates through SAML, and the tenant identifier that
//! scopes every record.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod service_provider;
pub mod tenant;

pub use service_provider::{LogoutMethod, SamlServiceProvider, MAX_ISSUER_LENGTH};
pub use tenant::TenantId;
