//! SAML 2.0 service provider metadata importer.
//!
//! Turns an SP-published `EntityDescriptor` document into a
//! [`SamlServiceProvider`](sp_model::SamlServiceProvider) record. The
//! importer fails closed: any structural defect, unusable endpoint,
//! undecodable certificate or unmet signature policy rejects the whole
//! document.
//!
//! # Modules
//!
//! - [`parser`] - streaming `quick-xml` parser producing [`SpMetadata`]
//! - [`certificate`] - X.509 certificate decoding and inspection
//! - [`signature`] - metadata signature policy and the verifier seam
//! - [`importer`] - maps parsed metadata onto a service provider record
//! - [`error`] - error types for metadata import
//!
//! # Example
//!
//! ```rust,ignore
//! use sp_metadata::{ImportConfig, MetadataImporter, SamlMetadataImporter};
//! use sp_model::TenantId;
//!
//! let importer = SamlMetadataImporter::new(ImportConfig::default());
//! let sp = importer.import(&document, TenantId::new(1))?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod certificate;
pub mod constants;
pub mod error;
pub mod importer;
pub mod model;
pub mod parser;
pub mod signature;

pub use error::{MetadataError, MetadataResult};
pub use importer::{ImportConfig, MetadataImporter, SamlMetadataImporter};
pub use model::{Endpoint, IndexedEndpoint, KeyDescriptor, KeyUsage, MetadataSignature, SpMetadata};
pub use signature::{SignaturePolicy, SignatureVerifier};
