//! `PostgreSQL` implementation of the service provider repository.

use async_trait::async_trait;
use sp_model::{SamlServiceProvider, TenantId};
use sp_storage::ServiceProviderRepository;
use sp_storage::error::{StorageError, StorageResult};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::entities::ServiceProviderRow;
use crate::error::{ENTITY, from_insert_error, from_sqlx_error};

/// `PostgreSQL` service provider repository bound to one tenant.
#[derive(Debug, Clone)]
pub struct PgServiceProviderRepository {
    pool: PgPool,
    tenant_id: TenantId,
}

impl PgServiceProviderRepository {
    /// Creates a repository handle for the tenant.
    #[must_use]
    pub const fn new(pool: PgPool, tenant_id: TenantId) -> Self {
        Self { pool, tenant_id }
    }
}

#[async_trait]
impl ServiceProviderRepository for PgServiceProviderRepository {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    async fn add(&self, sp: &SamlServiceProvider) -> StorageResult<()> {
        sqlx::query(
            r"INSERT INTO saml_service_providers (
                tenant_id, issuer, assertion_consumer_urls, default_assertion_consumer_url,
                attribute_consuming_service_index, name_id_format, name_id_claim_uri,
                signing_certificate, encryption_certificate, cert_alias,
                signing_algorithm_uri, digest_algorithm_uri,
                assertion_encryption_algorithm_uri, key_encryption_algorithm_uri,
                sign_response, sign_assertions, validate_signature_in_requests, encrypt_assertion,
                single_logout, slo_request_url, slo_response_url, logout_method,
                idp_initiated_sso, idp_initiated_slo, idp_init_slo_return_to_urls,
                enable_attributes_by_default, requested_audiences, requested_recipients,
                artifact_binding, ecp, assertion_query_profile
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
                $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31
            )",
        )
        .bind(self.tenant_id.get())
        .bind(&sp.issuer)
        .bind(Json(&sp.assertion_consumer_urls))
        .bind(&sp.default_assertion_consumer_url)
        .bind(&sp.attribute_consuming_service_index)
        .bind(&sp.name_id_format)
        .bind(&sp.name_id_claim_uri)
        .bind(&sp.signing_certificate)
        .bind(&sp.encryption_certificate)
        .bind(&sp.cert_alias)
        .bind(&sp.signing_algorithm_uri)
        .bind(&sp.digest_algorithm_uri)
        .bind(&sp.assertion_encryption_algorithm_uri)
        .bind(&sp.key_encryption_algorithm_uri)
        .bind(sp.sign_response)
        .bind(sp.sign_assertions)
        .bind(sp.validate_signature_in_requests)
        .bind(sp.encrypt_assertion)
        .bind(sp.single_logout)
        .bind(&sp.slo_request_url)
        .bind(&sp.slo_response_url)
        .bind(sp.logout_method.as_str())
        .bind(sp.idp_initiated_sso)
        .bind(sp.idp_initiated_slo)
        .bind(Json(&sp.idp_init_slo_return_to_urls))
        .bind(sp.enable_attributes_by_default)
        .bind(Json(&sp.requested_audiences))
        .bind(Json(&sp.requested_recipients))
        .bind(sp.artifact_binding)
        .bind(sp.ecp)
        .bind(sp.assertion_query_profile)
        .execute(&self.pool)
        .await
        .map_err(|e| from_insert_error(e, self.tenant_id, &sp.issuer))?;

        Ok(())
    }

    async fn update(&self, sp: &SamlServiceProvider) -> StorageResult<()> {
        let result = sqlx::query(
            r"UPDATE saml_service_providers SET
                assertion_consumer_urls = $3, default_assertion_consumer_url = $4,
                attribute_consuming_service_index = $5, name_id_format = $6, name_id_claim_uri = $7,
                signing_certificate = $8, encryption_certificate = $9, cert_alias = $10,
                signing_algorithm_uri = $11, digest_algorithm_uri = $12,
                assertion_encryption_algorithm_uri = $13, key_encryption_algorithm_uri = $14,
                sign_response = $15, sign_assertions = $16,
                validate_signature_in_requests = $17, encrypt_assertion = $18,
                single_logout = $19, slo_request_url = $20, slo_response_url = $21,
                logout_method = $22, idp_initiated_sso = $23, idp_initiated_slo = $24,
                idp_init_slo_return_to_urls = $25, enable_attributes_by_default = $26,
                requested_audiences = $27, requested_recipients = $28,
                artifact_binding = $29, ecp = $30, assertion_query_profile = $31,
                updated_at = NOW()
            WHERE tenant_id = $1 AND issuer = $2",
        )
        .bind(self.tenant_id.get())
        .bind(&sp.issuer)
        .bind(Json(&sp.assertion_consumer_urls))
        .bind(&sp.default_assertion_consumer_url)
        .bind(&sp.attribute_consuming_service_index)
        .bind(&sp.name_id_format)
        .bind(&sp.name_id_claim_uri)
        .bind(&sp.signing_certificate)
        .bind(&sp.encryption_certificate)
        .bind(&sp.cert_alias)
        .bind(&sp.signing_algorithm_uri)
        .bind(&sp.digest_algorithm_uri)
        .bind(&sp.assertion_encryption_algorithm_uri)
        .bind(&sp.key_encryption_algorithm_uri)
        .bind(sp.sign_response)
        .bind(sp.sign_assertions)
        .bind(sp.validate_signature_in_requests)
        .bind(sp.encrypt_assertion)
        .bind(sp.single_logout)
        .bind(&sp.slo_request_url)
        .bind(&sp.slo_response_url)
        .bind(sp.logout_method.as_str())
        .bind(sp.idp_initiated_sso)
        .bind(sp.idp_initiated_slo)
        .bind(Json(&sp.idp_init_slo_return_to_urls))
        .bind(sp.enable_attributes_by_default)
        .bind(Json(&sp.requested_audiences))
        .bind(Json(&sp.requested_recipients))
        .bind(sp.artifact_binding)
        .bind(sp.ecp)
        .bind(sp.assertion_query_profile)
        .execute(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(ENTITY, self.tenant_id, &sp.issuer));
        }

        Ok(())
    }

    async fn get_all(&self) -> StorageResult<Vec<SamlServiceProvider>> {
        let rows: Vec<ServiceProviderRow> = sqlx::query_as(
            "SELECT * FROM saml_service_providers WHERE tenant_id = $1 ORDER BY issuer",
        )
        .bind(self.tenant_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        rows.into_iter().map(SamlServiceProvider::try_from).collect()
    }

    async fn get_by_issuer(&self, issuer: &str) -> StorageResult<Option<SamlServiceProvider>> {
        let row: Option<ServiceProviderRow> = sqlx::query_as(
            "SELECT * FROM saml_service_providers WHERE tenant_id = $1 AND issuer = $2",
        )
        .bind(self.tenant_id.get())
        .bind(issuer)
        .fetch_optional(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        row.map(SamlServiceProvider::try_from).transpose()
    }

    async fn exists(&self, issuer: &str) -> StorageResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM saml_service_providers WHERE tenant_id = $1 AND issuer = $2)",
        )
        .bind(self.tenant_id.get())
        .bind(issuer)
        .fetch_one(&self.pool)
        .await
        .map_err(from_sqlx_error)?;

        Ok(exists)
    }

    async fn remove(&self, issuer: &str) -> StorageResult<bool> {
        let result =
            sqlx::query("DELETE FROM saml_service_providers WHERE tenant_id = $1 AND issuer = $2")
                .bind(self.tenant_id.get())
                .bind(issuer)
                .execute(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StorageResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM saml_service_providers WHERE tenant_id = $1")
                .bind(self.tenant_id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        #[allow(clippy::cast_sign_loss)]
        Ok(count as u64)
    }
}
