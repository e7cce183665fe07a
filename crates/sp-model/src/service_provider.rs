//! SAML service provider domain model.
//!
//! A service provider record is the static configuration the SSO runtime
//! consumes when an external application authenticates through SAML.

use serde::{Deserialize, Serialize};

use crate::tenant::TenantId;

/// Maximum accepted length of an issuer, in bytes.
pub const MAX_ISSUER_LENGTH: usize = 1024;

/// How single logout requests are delivered to the service provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoutMethod {
    /// Logout request sent server-to-server over SOAP.
    #[default]
    BackChannel,
    /// Logout request sent through the browser using HTTP-Redirect.
    FrontChannelRedirect,
    /// Logout request sent through the browser using HTTP-POST.
    FrontChannelPost,
}

impl LogoutMethod {
    /// Returns the stable string form used by storage backends.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BackChannel => "back-channel",
            Self::FrontChannelRedirect => "front-channel-redirect",
            Self::FrontChannelPost => "front-channel-post",
        }
    }

    /// Parses the string form produced by [`LogoutMethod::as_str`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "back-channel" => Some(Self::BackChannel),
            "front-channel-redirect" => Some(Self::FrontChannelRedirect),
            "front-channel-post" => Some(Self::FrontChannelPost),
            _ => None,
        }
    }
}

/// A SAML service provider configuration record.
///
/// Records are keyed by `(tenant_id, issuer)`. Apart from the issuer and the
/// assertion consumer endpoints, every field is carried unchanged between
/// storage and callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // Protocol options are independent switches
pub struct SamlServiceProvider {
    // === Identity ===
    /// SAML entity identifier of the service provider.
    pub issuer: String,
    /// Tenant owning this record.
    pub tenant_id: TenantId,

    // === Endpoints ===
    /// Assertion consumer service URLs, in preference order, without duplicates.
    pub assertion_consumer_urls: Vec<String>,
    /// Default assertion consumer service URL.
    pub default_assertion_consumer_url: Option<String>,
    /// Index of the SP's attribute consuming service.
    pub attribute_consuming_service_index: Option<String>,

    // === Name ID ===
    /// Name ID format requested by the SP.
    pub name_id_format: Option<String>,
    /// Claim URI used to populate the subject name ID.
    pub name_id_claim_uri: Option<String>,

    // === Certificates ===
    /// Certificate used to verify the SP's signatures (base64 DER).
    pub signing_certificate: Option<String>,
    /// Certificate used to encrypt assertions for the SP (base64 DER).
    pub encryption_certificate: Option<String>,
    /// Alias of the certificate in the tenant keystore.
    pub cert_alias: Option<String>,

    // === Algorithms ===
    /// Signature algorithm URI for responses and assertions.
    pub signing_algorithm_uri: Option<String>,
    /// Digest algorithm URI for responses and assertions.
    pub digest_algorithm_uri: Option<String>,
    /// Assertion encryption algorithm URI.
    pub assertion_encryption_algorithm_uri: Option<String>,
    /// Key encryption algorithm URI.
    pub key_encryption_algorithm_uri: Option<String>,

    // === Signing and encryption ===
    /// Sign SAML responses.
    pub sign_response: bool,
    /// Sign SAML assertions.
    pub sign_assertions: bool,
    /// Require signed authentication and logout requests.
    pub validate_signature_in_requests: bool,
    /// Encrypt assertions.
    pub encrypt_assertion: bool,

    // === Logout ===
    /// Single logout is enabled.
    pub single_logout: bool,
    /// Endpoint receiving logout requests.
    pub slo_request_url: Option<String>,
    /// Endpoint receiving logout responses.
    pub slo_response_url: Option<String>,
    /// Delivery method for logout requests.
    pub logout_method: LogoutMethod,

    // === IdP-initiated flows ===
    /// Allow IdP-initiated SSO.
    pub idp_initiated_sso: bool,
    /// Allow IdP-initiated SLO.
    pub idp_initiated_slo: bool,
    /// Return-to URLs accepted for IdP-initiated SLO.
    pub idp_init_slo_return_to_urls: Vec<String>,

    // === Attributes and audiences ===
    /// Release user attributes even when not requested.
    pub enable_attributes_by_default: bool,
    /// Additional audiences placed in assertions.
    pub requested_audiences: Vec<String>,
    /// Additional recipients placed in assertions.
    pub requested_recipients: Vec<String>,

    // === Bindings and profiles ===
    /// SAML artifact binding is enabled.
    pub artifact_binding: bool,
    /// Enhanced Client or Proxy profile is enabled.
    pub ecp: bool,
    /// Assertion query/request profile is enabled.
    pub assertion_query_profile: bool,
}

impl SamlServiceProvider {
    /// Creates a record with the given issuer and default protocol options.
    #[must_use]
    pub fn new(tenant_id: TenantId, issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            tenant_id,
            assertion_consumer_urls: Vec::new(),
            default_assertion_consumer_url: None,
            attribute_consuming_service_index: None,
            name_id_format: None,
            name_id_claim_uri: None,
            signing_certificate: None,
            encryption_certificate: None,
            cert_alias: None,
            signing_algorithm_uri: None,
            digest_algorithm_uri: None,
            assertion_encryption_algorithm_uri: None,
            key_encryption_algorithm_uri: None,
            sign_response: true,
            sign_assertions: false,
            validate_signature_in_requests: false,
            encrypt_assertion: false,
            single_logout: false,
            slo_request_url: None,
            slo_response_url: None,
            logout_method: LogoutMethod::default(),
            idp_initiated_sso: false,
            idp_initiated_slo: false,
            idp_init_slo_return_to_urls: Vec::new(),
            enable_attributes_by_default: false,
            requested_audiences: Vec::new(),
            requested_recipients: Vec::new(),
            artifact_binding: false,
            ecp: false,
            assertion_query_profile: false,
        }
    }

    /// Adds an assertion consumer URL, ignoring duplicates.
    #[must_use]
    pub fn with_acs_url(mut self, url: impl Into<String>) -> Self {
        self.add_acs_url(url);
        self
    }

    /// Sets the default assertion consumer URL, adding it to the list if missing.
    #[must_use]
    pub fn with_default_acs_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.add_acs_url(url.clone());
        self.default_assertion_consumer_url = Some(url);
        self
    }

    /// Sets the name ID format.
    #[must_use]
    pub fn with_name_id_format(mut self, format: impl Into<String>) -> Self {
        self.name_id_format = Some(format.into());
        self
    }

    /// Sets the signing certificate.
    #[must_use]
    pub fn with_signing_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.signing_certificate = Some(certificate.into());
        self
    }

    /// Enables single logout with the given request endpoint.
    #[must_use]
    pub fn with_single_logout(mut self, url: impl Into<String>, method: LogoutMethod) -> Self {
        self.single_logout = true;
        self.slo_request_url = Some(url.into());
        self.logout_method = method;
        self
    }

    /// Appends an assertion consumer URL unless already present.
    ///
    /// Returns true if the URL was added.
    pub fn add_acs_url(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.assertion_consumer_urls.contains(&url) {
            return false;
        }
        self.assertion_consumer_urls.push(url);
        true
    }

    /// Returns the default ACS URL, falling back to the first configured URL.
    #[must_use]
    pub fn effective_default_acs_url(&self) -> Option<&str> {
        self.default_assertion_consumer_url
            .as_deref()
            .or_else(|| self.assertion_consumer_urls.first().map(String::as_str))
    }

    /// Validates the structure of this record.
    ///
    /// ## Errors
    ///
    /// Returns a description of the first violated constraint.
    pub fn validate(&self) -> Result<(), String> {
        if self.issuer.trim().is_empty() {
            return Err("Issuer is required".to_string());
        }
        if self.issuer.len() > MAX_ISSUER_LENGTH {
            return Err(format!(
                "Issuer exceeds maximum length of {MAX_ISSUER_LENGTH} bytes"
            ));
        }
        for (i, url) in self.assertion_consumer_urls.iter().enumerate() {
            if url.trim().is_empty() {
                return Err("Assertion consumer URL must not be empty".to_string());
            }
            if self.assertion_consumer_urls[..i].contains(url) {
                return Err(format!("Duplicate assertion consumer URL: {url}"));
            }
        }
        if let Some(default) = &self.default_assertion_consumer_url {
            if !self.assertion_consumer_urls.contains(default) {
                return Err(format!(
                    "Default assertion consumer URL is not a configured URL: {default}"
                ));
            }
        }
        Ok(())
    }
}
