//! Database entity types for `SQLx`.
//!
//! These types map directly to database rows and are converted
//! to domain models in [`crate::convert`].

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// Database row for SAML service providers.
#[derive(Debug, Clone, FromRow)]
#[allow(clippy::struct_excessive_bools, missing_docs)]
pub struct ServiceProviderRow {
    pub tenant_id: i32,
    pub issuer: String,
    pub assertion_consumer_urls: Json<Vec<String>>,
    pub default_assertion_consumer_url: Option<String>,
    pub attribute_consuming_service_index: Option<String>,
    pub name_id_format: Option<String>,
    pub name_id_claim_uri: Option<String>,
    pub signing_certificate: Option<String>,
    pub encryption_certificate: Option<String>,
    pub cert_alias: Option<String>,
    pub signing_algorithm_uri: Option<String>,
    pub digest_algorithm_uri: Option<String>,
    pub assertion_encryption_algorithm_uri: Option<String>,
    pub key_encryption_algorithm_uri: Option<String>,
    pub sign_response: bool,
    pub sign_assertions: bool,
    pub validate_signature_in_requests: bool,
    pub encrypt_assertion: bool,
    pub single_logout: bool,
    pub slo_request_url: Option<String>,
    pub slo_response_url: Option<String>,
    pub logout_method: String,
    pub idp_initiated_sso: bool,
    pub idp_initiated_slo: bool,
    pub idp_init_slo_return_to_urls: Json<Vec<String>>,
    pub enable_attributes_by_default: bool,
    pub requested_audiences: Json<Vec<String>>,
    pub requested_recipients: Json<Vec<String>>,
    pub artifact_binding: bool,
    pub ecp: bool,
    pub assertion_query_profile: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
