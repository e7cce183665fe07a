//! Metadata import into service provider records.

use std::sync::Arc;

use chrono::Utc;
use sp_core::config::{DEFAULT_MAX_METADATA_SIZE, MetadataConfig};
use sp_model::{LogoutMethod, SamlServiceProvider, TenantId};
use url::Url;

use crate::certificate::resolve_certificate;
use crate::constants::SamlBinding;
use crate::error::{MetadataError, MetadataResult};
use crate::model::{IndexedEndpoint, SpMetadata};
use crate::parser;
use crate::signature::{self, SignaturePolicy, SignatureVerifier};

/// Converts a metadata document into a service provider record.
pub trait MetadataImporter: Send + Sync {
    /// Imports `document` as a record owned by `tenant_id`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the document is structurally invalid or fails the
    /// trust policy. No partial record is ever returned.
    fn import(&self, document: &str, tenant_id: TenantId) -> MetadataResult<SamlServiceProvider>;
}

/// Importer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// Largest accepted document, in bytes.
    pub max_document_size: usize,
    /// Signature requirement.
    pub signature_policy: SignaturePolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_document_size: DEFAULT_MAX_METADATA_SIZE,
            signature_policy: SignaturePolicy::Optional,
        }
    }
}

impl From<&MetadataConfig> for ImportConfig {
    fn from(config: &MetadataConfig) -> Self {
        Self {
            max_document_size: config.max_document_size,
            signature_policy: SignaturePolicy::from_required(config.require_signed),
        }
    }
}

/// Default [`MetadataImporter`] for SAML 2.0 SP metadata.
#[derive(Clone, Default)]
pub struct SamlMetadataImporter {
    config: ImportConfig,
    verifier: Option<Arc<dyn SignatureVerifier>>,
}

impl std::fmt::Debug for SamlMetadataImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamlMetadataImporter")
            .field("config", &self.config)
            .field("verifier", &self.verifier.is_some())
            .finish()
    }
}

impl SamlMetadataImporter {
    /// Creates an importer without a signature verifier.
    #[must_use]
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            verifier: None,
        }
    }

    /// Sets the verifier used for signed documents.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Returns the importer settings.
    #[must_use]
    pub const fn config(&self) -> &ImportConfig {
        &self.config
    }

    fn check_size(&self, document: &str) -> MetadataResult<()> {
        if document.len() > self.config.max_document_size {
            return Err(MetadataError::TooLarge {
                size: document.len(),
                max: self.config.max_document_size,
            });
        }
        Ok(())
    }
}

impl MetadataImporter for SamlMetadataImporter {
    fn import(&self, document: &str, tenant_id: TenantId) -> MetadataResult<SamlServiceProvider> {
        self.check_size(document)?;

        let metadata = parser::parse(document)?;

        if let Some(valid_until) = metadata.valid_until {
            if valid_until <= Utc::now() {
                return Err(MetadataError::Expired(valid_until));
            }
        }

        let status = signature::enforce(
            self.config.signature_policy,
            self.verifier.as_deref(),
            document,
            &metadata,
        )?;

        let service_provider = to_service_provider(&metadata, tenant_id)?;
        service_provider
            .validate()
            .map_err(MetadataError::InvalidServiceProvider)?;

        tracing::debug!(
            tenant_id = %tenant_id,
            issuer = %service_provider.issuer,
            acs_urls = service_provider.assertion_consumer_urls.len(),
            signature = ?status,
            "Imported service provider metadata"
        );

        Ok(service_provider)
    }
}

/// Maps parsed metadata onto a record.
fn to_service_provider(
    metadata: &SpMetadata,
    tenant_id: TenantId,
) -> MetadataResult<SamlServiceProvider> {
    let mut sp = SamlServiceProvider::new(tenant_id, metadata.entity_id.clone());

    // Stable sort keeps document order among equal indexes.
    let mut consumers: Vec<&IndexedEndpoint> = metadata.assertion_consumer_services.iter().collect();
    consumers.sort_by_key(|acs| acs.index.unwrap_or(u32::MAX));

    for acs in &consumers {
        check_location(&acs.endpoint.location, "AssertionConsumerService")?;
        sp.add_acs_url(acs.endpoint.location.clone());
        match acs.endpoint.saml_binding() {
            Some(SamlBinding::HttpArtifact) => sp.artifact_binding = true,
            Some(SamlBinding::Paos) => sp.ecp = true,
            _ => {}
        }
    }
    sp.default_assertion_consumer_url = consumers
        .iter()
        .find(|acs| acs.is_default == Some(true))
        .or_else(|| consumers.first())
        .map(|acs| acs.endpoint.location.clone());

    sp.attribute_consuming_service_index = metadata.attribute_consuming_service_index.clone();
    sp.name_id_format = metadata.name_id_formats.first().cloned();
    sp.validate_signature_in_requests = metadata.authn_requests_signed;
    sp.sign_assertions = metadata.want_assertions_signed;

    if let Some(key) = metadata.key_descriptors.iter().find(|k| k.is_signing()) {
        let certificate = resolve_certificate(&key.certificate)?;
        if certificate.is_expired_at(Utc::now()) {
            tracing::warn!(
                issuer = %metadata.entity_id,
                subject = %certificate.subject,
                not_after = %certificate.not_after,
                "Signing certificate in metadata has expired"
            );
        }
        sp.signing_certificate = Some(certificate.encoded);
        sp.cert_alias = Some(metadata.entity_id.clone());
    }
    if let Some(key) = metadata.key_descriptors.iter().find(|k| k.is_encryption()) {
        sp.encryption_certificate = Some(resolve_certificate(&key.certificate)?.encoded);
    }

    if let Some(slo) = metadata.single_logout_services.first() {
        check_location(&slo.location, "SingleLogoutService")?;
        if let Some(response_location) = &slo.response_location {
            check_location(response_location, "SingleLogoutService")?;
        }
        sp.single_logout = true;
        sp.slo_request_url = Some(slo.location.clone());
        sp.slo_response_url = slo.response_location.clone();
        sp.logout_method = match slo.saml_binding() {
            Some(SamlBinding::HttpRedirect) => LogoutMethod::FrontChannelRedirect,
            Some(SamlBinding::HttpPost) => LogoutMethod::FrontChannelPost,
            _ => LogoutMethod::BackChannel,
        };
    }

    Ok(sp)
}

/// Accepts absolute `http` and `https` URLs only.
fn check_location(location: &str, element: &str) -> MetadataResult<()> {
    let url = Url::parse(location)
        .map_err(|e| MetadataError::InvalidEndpoint(format!("{element} '{location}': {e}")))?;
    match url.scheme() {
        "https" | "http" if url.host().is_some() => Ok(()),
        scheme => Err(MetadataError::InvalidEndpoint(format!(
            "{element} '{location}' uses unsupported scheme '{scheme}'"
        ))),
    }
}
