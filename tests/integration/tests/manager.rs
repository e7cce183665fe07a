//! Manager integration tests over PostgreSQL.

use sp_manager::{ErrorKind, bootstrap};
use sp_model::TenantId;

use crate::common::{SP_METADATA, TestEnv, full_record, simple_record};

const T1: TenantId = TenantId::new(1);
const T2: TenantId = TenantId::new(2);

/// Tests the add, get, update, remove lifecycle.
#[tokio::test]
async fn test_service_provider_lifecycle() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let manager = env.manager();

    let record = full_record(T1, "https://sp.example.com");
    assert!(manager.add_service_provider(record.clone(), T1).await?);
    assert_eq!(
        manager.get_service_provider("https://sp.example.com", T1).await?,
        Some(record)
    );
    assert!(!manager.is_service_provider_exists("https://sp.example.com", T2).await?);

    assert!(
        manager
            .update_service_provider(simple_record(T1, "https://sp.example.com"), T1)
            .await?
    );
    let updated = manager.get_service_provider("https://sp.example.com", T1).await?.unwrap();
    assert_eq!(updated.assertion_consumer_urls, vec!["https://sp.example.com/acs"]);

    assert!(manager.remove_service_provider("https://sp.example.com", T1).await?);
    assert!(!manager.remove_service_provider("https://sp.example.com", T1).await?);
    assert!(manager.get_service_providers(T1).await?.is_empty());
    Ok(())
}

/// Tests that a duplicate add surfaces as a conflict.
#[tokio::test]
async fn test_duplicate_add_is_conflict() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let manager = env.manager();

    manager
        .add_service_provider(simple_record(T1, "https://sp.example.com"), T1)
        .await?;
    let err = manager
        .add_service_provider(simple_record(T1, "https://sp.example.com"), T1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    Ok(())
}

/// Tests metadata upload persisting the imported record.
#[tokio::test]
async fn test_upload_then_get() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let manager = env.manager();

    let uploaded = manager.upload_service_provider(SP_METADATA, T1).await?;
    let stored = manager
        .get_service_provider("https://sp.example.com/saml", T1)
        .await?
        .unwrap();

    assert_eq!(stored, uploaded);
    assert_eq!(stored.issuer, "https://sp.example.com/saml");
    assert_eq!(stored.assertion_consumer_urls.len(), 2);
    assert!(stored.signing_certificate.is_some());
    Ok(())
}

/// Tests that rejected metadata writes nothing.
#[tokio::test]
async fn test_invalid_upload_writes_nothing() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let manager = env.manager();

    let err = manager
        .upload_service_provider("<EntitiesDescriptor/>", T1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidMetadata);
    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saml_service_providers")
        .fetch_one(&env.pool)
        .await?;
    assert_eq!(rows, 0);
    Ok(())
}

/// Tests that a closed pool is reported as an access failure.
#[tokio::test]
async fn test_closed_pool_is_access_failure() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let manager = env.manager();

    env.pool.close().await;
    let err = manager.get_service_providers(T1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AccessFailure);
    assert!(err.cause_chain().contains("closed"), "{}", err.cause_chain());
    Ok(())
}

/// Tests wiring a manager from configuration.
#[tokio::test]
async fn test_bootstrap_connect() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let manager = bootstrap::connect(&env.config()).await?;
    manager.upload_service_provider(SP_METADATA, TenantId::SUPER).await?;

    assert!(
        manager
            .is_service_provider_exists("https://sp.example.com/saml", TenantId::SUPER)
            .await?
    );
    assert!(!env.manager().is_service_provider_exists("https://sp.example.com/saml", T1).await?);
    Ok(())
}
