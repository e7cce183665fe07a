//! X.509 certificate handling for metadata key descriptors.

use base64::Engine;
use chrono::{DateTime, Utc};

use crate::error::{MetadataError, MetadataResult};

/// A certificate decoded from a `ds:X509Certificate` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCertificate {
    /// Base64 DER encoding with all whitespace removed.
    pub encoded: String,
    /// Subject distinguished name.
    pub subject: String,
    /// End of the validity period.
    pub not_after: DateTime<Utc>,
}

impl ResolvedCertificate {
    /// Returns true if the certificate validity ended before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.not_after < now
    }
}

/// Decodes and parses a base64 certificate as found in metadata.
///
/// Line breaks and indentation inside the element are ignored.
///
/// ## Errors
///
/// Returns `MetadataError::Base64Decode` if the text is not base64 and
/// `MetadataError::InvalidCertificate` if the bytes are not an X.509
/// certificate.
pub fn resolve_certificate(text: &str) -> MetadataResult<ResolvedCertificate> {
    use x509_parser::prelude::*;

    let encoded: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if encoded.is_empty() {
        return Err(MetadataError::InvalidCertificate(
            "certificate element is empty".to_string(),
        ));
    }

    let der = base64::engine::general_purpose::STANDARD.decode(&encoded)?;

    let (_, cert) = X509Certificate::from_der(&der)
        .map_err(|e| MetadataError::InvalidCertificate(e.to_string()))?;

    let not_after = DateTime::from_timestamp(cert.validity().not_after.timestamp(), 0)
        .ok_or_else(|| {
            MetadataError::InvalidCertificate("validity end out of range".to_string())
        })?;

    Ok(ResolvedCertificate {
        subject: cert.subject().to_string(),
        not_after,
        encoded,
    })
}
