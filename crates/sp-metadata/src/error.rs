//! Metadata import error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for metadata import.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Reasons a metadata document is rejected.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Document exceeds the configured size limit.
    #[error("metadata document is {size} bytes, limit is {max}")]
    TooLarge {
        /// Size of the submitted document.
        size: usize,
        /// Configured limit.
        max: usize,
    },

    /// XML is not well formed or uses a forbidden construct.
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// Document does not describe a single service provider.
    #[error("not a service provider metadata document: {0}")]
    NotServiceProvider(String),

    /// Missing required element or attribute.
    #[error("missing required element: {0}")]
    MissingElement(String),

    /// Attribute value cannot be interpreted.
    #[error("invalid value '{value}' for {name}")]
    InvalidAttribute {
        /// Qualified attribute name.
        name: String,
        /// Offending value.
        value: String,
    },

    /// Endpoint location is not an absolute http(s) URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Base64 decoding error.
    #[error("base64 decode error: {0}")]
    Base64Decode(String),

    /// Certificate is not a DER encoded X.509 certificate.
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),

    /// `validUntil` lies in the past.
    #[error("metadata expired at {0}")]
    Expired(DateTime<Utc>),

    /// Signature required but absent.
    #[error("metadata is not signed")]
    Unsigned,

    /// Signature present but not acceptable.
    #[error("signature validation failed: {0}")]
    SignatureInvalid(String),

    /// Resulting record violates service provider invariants.
    #[error("invalid service provider: {0}")]
    InvalidServiceProvider(String),
}

impl From<quick_xml::Error> for MetadataError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for MetadataError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::XmlParse(err.to_string())
    }
}

impl From<base64::DecodeError> for MetadataError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Base64Decode(err.to_string())
    }
}
