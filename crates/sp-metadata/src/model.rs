//! Parsed representation of an SP metadata document.
//!
//! These types mirror the parts of `md:EntityDescriptor` the registry
//! consumes. They carry raw document values; interpretation (URL checks,
//! certificate decoding, ordering) happens in the importer.

use chrono::{DateTime, Utc};

use crate::constants::SamlBinding;

/// Service provider metadata extracted from an `EntityDescriptor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpMetadata {
    /// `EntityDescriptor@entityID`.
    pub entity_id: String,
    /// `EntityDescriptor@ID`, the target of an enveloped signature.
    pub id: Option<String>,
    /// `EntityDescriptor@validUntil`.
    pub valid_until: Option<DateTime<Utc>>,
    /// `SPSSODescriptor@AuthnRequestsSigned`.
    pub authn_requests_signed: bool,
    /// `SPSSODescriptor@WantAssertionsSigned`.
    pub want_assertions_signed: bool,
    /// Key descriptors carrying an X.509 certificate, in document order.
    pub key_descriptors: Vec<KeyDescriptor>,
    /// Single logout endpoints, in document order.
    pub single_logout_services: Vec<Endpoint>,
    /// Supported name identifier formats, in document order.
    pub name_id_formats: Vec<String>,
    /// Assertion consumer endpoints, in document order.
    pub assertion_consumer_services: Vec<IndexedEndpoint>,
    /// Index of the first `AttributeConsumingService`.
    pub attribute_consuming_service_index: Option<String>,
    /// Enveloped signature over the entity descriptor.
    pub signature: Option<MetadataSignature>,
}

/// Intended use of a key descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyUsage {
    /// `use="signing"`.
    Signing,
    /// `use="encryption"`.
    Encryption,
}

impl KeyUsage {
    /// Parses the `use` attribute value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "signing" => Some(Self::Signing),
            "encryption" => Some(Self::Encryption),
            _ => None,
        }
    }
}

/// A `KeyDescriptor` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDescriptor {
    /// Declared use; `None` means the key serves both purposes.
    pub usage: Option<KeyUsage>,
    /// Base64 certificate text as it appears in the document.
    pub certificate: String,
}

impl KeyDescriptor {
    /// Returns true if the key may be used to verify signatures.
    #[must_use]
    pub fn is_signing(&self) -> bool {
        matches!(self.usage, None | Some(KeyUsage::Signing))
    }

    /// Returns true if the key is declared for encryption.
    #[must_use]
    pub fn is_encryption(&self) -> bool {
        self.usage == Some(KeyUsage::Encryption)
    }
}

/// An endpoint element such as `SingleLogoutService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `Binding` attribute URI.
    pub binding: String,
    /// `Location` attribute.
    pub location: String,
    /// `ResponseLocation` attribute.
    pub response_location: Option<String>,
}

impl Endpoint {
    /// Returns the binding if it is a known SAML binding.
    #[must_use]
    pub fn saml_binding(&self) -> Option<SamlBinding> {
        SamlBinding::from_uri(&self.binding)
    }
}

/// An indexed endpoint such as `AssertionConsumerService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEndpoint {
    /// The endpoint.
    pub endpoint: Endpoint,
    /// `index` attribute.
    pub index: Option<u32>,
    /// `isDefault` attribute.
    pub is_default: Option<bool>,
}

/// The parts of an enveloped `ds:Signature` needed to check and verify it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSignature {
    /// `Reference@URI`.
    pub reference_uri: Option<String>,
    /// `SignatureMethod@Algorithm`.
    pub signature_method: Option<String>,
    /// `DigestMethod@Algorithm`.
    pub digest_method: Option<String>,
    /// `DigestValue` text.
    pub digest_value: Option<String>,
    /// `SignatureValue` text.
    pub signature_value: Option<String>,
    /// Certificate from the signature's `KeyInfo`.
    pub certificate: Option<String>,
}

impl MetadataSignature {
    /// Returns true if the reference points at the element with the given ID.
    #[must_use]
    pub fn references(&self, id: &str) -> bool {
        self.reference_uri
            .as_deref()
            .and_then(|uri| uri.strip_prefix('#'))
            .is_some_and(|target| target == id)
    }
}
