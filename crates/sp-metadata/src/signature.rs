//! Metadata signature policy.
//!
//! Cryptographic verification of XML signatures is delegated to a
//! [`SignatureVerifier`] supplied by the deployment. This module decides when
//! a signature is needed, checks that an enveloped signature actually covers
//! the entity descriptor, and hands it to the verifier.

use std::fmt;

use crate::error::{MetadataError, MetadataResult};
use crate::model::{MetadataSignature, SpMetadata};

/// Whether uploaded metadata must be signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignaturePolicy {
    /// Unsigned documents are accepted; signatures present are still checked.
    #[default]
    Optional,
    /// Documents without a verified signature are rejected.
    Required,
}

impl SignaturePolicy {
    /// Maps a "require signed" flag to a policy.
    #[must_use]
    pub const fn from_required(required: bool) -> Self {
        if required { Self::Required } else { Self::Optional }
    }
}

impl fmt::Display for SignaturePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional => f.write_str("optional"),
            Self::Required => f.write_str("required"),
        }
    }
}

/// Verifies the enveloped signature of a metadata document.
pub trait SignatureVerifier: Send + Sync {
    /// Verifies `signature` over `document`.
    ///
    /// ## Errors
    ///
    /// Returns `MetadataError::SignatureInvalid` if the signature does not
    /// verify against a trusted key.
    fn verify(
        &self,
        document: &str,
        metadata: &SpMetadata,
        signature: &MetadataSignature,
    ) -> MetadataResult<()>;
}

/// Outcome of a policy check that did not reject the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStatus {
    /// No signature present and none required.
    Unsigned,
    /// Signature present but no verifier configured.
    Unverified,
    /// Signature verified.
    Verified,
}

/// Applies the signature policy to a parsed document.
///
/// ## Errors
///
/// Returns `MetadataError::Unsigned` if a signature is required but absent,
/// and `MetadataError::SignatureInvalid` if the signature does not reference
/// the entity descriptor, fails verification, or is required while no
/// verifier is configured.
pub fn enforce(
    policy: SignaturePolicy,
    verifier: Option<&dyn SignatureVerifier>,
    document: &str,
    metadata: &SpMetadata,
) -> MetadataResult<SignatureStatus> {
    let Some(signature) = metadata.signature.as_ref() else {
        return match policy {
            SignaturePolicy::Required => Err(MetadataError::Unsigned),
            SignaturePolicy::Optional => Ok(SignatureStatus::Unsigned),
        };
    };

    let covers_descriptor = metadata
        .id
        .as_deref()
        .is_some_and(|id| signature.references(id));
    if !covers_descriptor {
        return Err(MetadataError::SignatureInvalid(
            "signature reference does not cover the entity descriptor".to_string(),
        ));
    }

    match (verifier, policy) {
        (Some(verifier), _) => {
            verifier.verify(document, metadata, signature)?;
            Ok(SignatureStatus::Verified)
        }
        (None, SignaturePolicy::Required) => Err(MetadataError::SignatureInvalid(
            "no signature verifier configured".to_string(),
        )),
        (None, SignaturePolicy::Optional) => Ok(SignatureStatus::Unverified),
    }
}
