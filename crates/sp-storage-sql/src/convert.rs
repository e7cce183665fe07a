//! Conversion between database entities and domain models.

use sp_model::{LogoutMethod, SamlServiceProvider, TenantId};
use sp_storage::StorageError;

use crate::entities::ServiceProviderRow;

/// Convert a `ServiceProviderRow` to a `SamlServiceProvider` domain model.
impl TryFrom<ServiceProviderRow> for SamlServiceProvider {
    type Error = StorageError;

    fn try_from(row: ServiceProviderRow) -> Result<Self, Self::Error> {
        let logout_method = LogoutMethod::parse(&row.logout_method).ok_or_else(|| {
            StorageError::InvalidData(format!(
                "unknown logout method '{}' for issuer '{}'",
                row.logout_method, row.issuer
            ))
        })?;

        Ok(Self {
            issuer: row.issuer,
            tenant_id: TenantId::new(row.tenant_id),
            assertion_consumer_urls: row.assertion_consumer_urls.0,
            default_assertion_consumer_url: row.default_assertion_consumer_url,
            attribute_consuming_service_index: row.attribute_consuming_service_index,
            name_id_format: row.name_id_format,
            name_id_claim_uri: row.name_id_claim_uri,
            signing_certificate: row.signing_certificate,
            encryption_certificate: row.encryption_certificate,
            cert_alias: row.cert_alias,
            signing_algorithm_uri: row.signing_algorithm_uri,
            digest_algorithm_uri: row.digest_algorithm_uri,
            assertion_encryption_algorithm_uri: row.assertion_encryption_algorithm_uri,
            key_encryption_algorithm_uri: row.key_encryption_algorithm_uri,
            sign_response: row.sign_response,
            sign_assertions: row.sign_assertions,
            validate_signature_in_requests: row.validate_signature_in_requests,
            encrypt_assertion: row.encrypt_assertion,
            single_logout: row.single_logout,
            slo_request_url: row.slo_request_url,
            slo_response_url: row.slo_response_url,
            logout_method,
            idp_initiated_sso: row.idp_initiated_sso,
            idp_initiated_slo: row.idp_initiated_slo,
            idp_init_slo_return_to_urls: row.idp_init_slo_return_to_urls.0,
            enable_attributes_by_default: row.enable_attributes_by_default,
            requested_audiences: row.requested_audiences.0,
            requested_recipients: row.requested_recipients.0,
            artifact_binding: row.artifact_binding,
            ecp: row.ecp,
            assertion_query_profile: row.assertion_query_profile,
        })
    }
}
