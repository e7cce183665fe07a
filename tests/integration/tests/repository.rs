//! PostgreSQL repository integration tests.

use sp_model::TenantId;
use sp_storage::StorageError;

use crate::common::{TestEnv, full_record, simple_record};

const T1: TenantId = TenantId::new(1);
const T2: TenantId = TenantId::new(2);

/// Tests that every field survives a write and read.
#[tokio::test]
async fn test_roundtrip_preserves_all_fields() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = env.repository(T1).await?;

    let record = full_record(T1, "https://sp.example.com");
    repo.add(&record).await?;

    let stored = repo.get_by_issuer("https://sp.example.com").await?;
    assert_eq!(stored, Some(record));
    Ok(())
}

/// Tests that a second insert of one issuer is a duplicate.
#[tokio::test]
async fn test_duplicate_add_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = env.repository(T1).await?;

    repo.add(&simple_record(T1, "https://sp.example.com")).await?;
    let err = repo
        .add(&simple_record(T1, "https://sp.example.com"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, StorageError::Duplicate { tenant_id, .. } if tenant_id == T1),
        "unexpected error: {err}"
    );
    assert_eq!(repo.count().await?, 1);
    Ok(())
}

/// Tests that tenants sharing the table do not see each other's rows.
#[tokio::test]
async fn test_tenants_are_isolated() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let t1 = env.repository(T1).await?;
    let t2 = env.repository(T2).await?;

    t1.add(&simple_record(T1, "https://shared.example.com")).await?;

    assert!(!t2.exists("https://shared.example.com").await?);
    assert!(t2.get_all().await?.is_empty());
    assert!(!t2.remove("https://shared.example.com").await?);
    assert!(
        t2.update(&simple_record(T2, "https://shared.example.com"))
            .await
            .unwrap_err()
            .is_not_found()
    );

    // The same issuer can be registered independently in another tenant.
    t2.add(&simple_record(T2, "https://shared.example.com")).await?;
    assert_eq!(t1.count().await?, 1);
    assert_eq!(t2.count().await?, 1);
    Ok(())
}

/// Tests that the handle's tenant wins over the tenant carried by a record.
#[tokio::test]
async fn test_rows_are_written_under_handle_tenant() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let t1 = env.repository(T1).await?;

    t1.add(&simple_record(TenantId::new(99), "https://sp.example.com")).await?;

    let tenant: i32 =
        sqlx::query_scalar("SELECT tenant_id FROM saml_service_providers WHERE issuer = $1")
            .bind("https://sp.example.com")
            .fetch_one(&env.pool)
            .await?;
    assert_eq!(tenant, 1);
    Ok(())
}

/// Tests that update replaces the whole row.
#[tokio::test]
async fn test_update_is_full_replace() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = env.repository(T1).await?;

    repo.add(&full_record(T1, "https://sp.example.com")).await?;
    let replacement = simple_record(T1, "https://sp.example.com");
    repo.update(&replacement).await?;

    let stored = repo.get_by_issuer("https://sp.example.com").await?.unwrap();
    assert_eq!(stored, replacement);
    assert_eq!(stored.assertion_consumer_urls.len(), 1);
    Ok(())
}

/// Tests that updating a missing issuer reports not found.
#[tokio::test]
async fn test_update_missing_is_not_found() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = env.repository(T1).await?;

    let err = repo
        .update(&simple_record(T1, "https://nobody.example.com"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

/// Tests listing order and removal.
#[tokio::test]
async fn test_get_all_and_remove() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let repo = env.repository(T1).await?;

    for issuer in ["https://c.example.com", "https://a.example.com", "https://b.example.com"] {
        repo.add(&simple_record(T1, issuer)).await?;
    }

    let issuers: Vec<String> = repo.get_all().await?.into_iter().map(|sp| sp.issuer).collect();
    assert_eq!(
        issuers,
        vec!["https://a.example.com", "https://b.example.com", "https://c.example.com"]
    );

    assert!(repo.remove("https://b.example.com").await?);
    assert!(!repo.remove("https://b.example.com").await?);
    assert_eq!(repo.count().await?, 2);
    Ok(())
}

/// Tests that the primary key admits exactly one of several concurrent inserts.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_have_single_winner() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let mut attempts = Vec::new();
    for _ in 0..6 {
        let repo = env.repository(T1).await?;
        attempts.push(tokio::spawn(async move {
            repo.add(&simple_record(T1, "https://contended.example.com")).await
        }));
    }

    let mut successes = 0;
    for result in futures::future::join_all(attempts).await {
        match result? {
            Ok(()) => successes += 1,
            Err(err) => assert!(err.is_duplicate(), "unexpected error: {err}"),
        }
    }
    assert_eq!(successes, 1);
    Ok(())
}
