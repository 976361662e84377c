//! Integration tests for the Redis code store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p otc_infra --test redis_store_integration -- --ignored

use std::sync::Arc;

use otc_core::{ExpiringStore, OtcService, OtcServiceConfig, Replacement, VerificationOutcome};
use otc_infra::{RedisClient, RedisOtcStore};
use otc_shared::CacheConfig;

async fn store(prefix: &str) -> RedisOtcStore {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("otc_infra=debug")
        .with_test_writer()
        .try_init();

    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let config = CacheConfig::redis(url).with_prefix(format!("otc-test-{}", prefix));
    RedisOtcStore::new(RedisClient::new(config).await.expect("Failed to connect to Redis"))
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_health_check() {
    let store = store("health").await;
    assert!(store.health_check().await.unwrap());
    assert_eq!(store.backend_name(), "redis");
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_put_get_ttl_delete() {
    let store = store("basic").await;

    store.put("otc:abc", "value", 300).await.unwrap();
    assert_eq!(store.get("otc:abc").await.unwrap().as_deref(), Some("value"));

    let ttl = store.remaining_ttl("otc:abc").await.unwrap().unwrap();
    assert!(ttl > 290 && ttl <= 300);

    assert!(store.delete("otc:abc").await.unwrap());
    assert!(store.get("otc:abc").await.unwrap().is_none());
    assert!(store.remaining_ttl("otc:abc").await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_compare_and_replace_script() {
    let store = store("cas").await;
    store.put("otc:abc", "v1", 300).await.unwrap();

    assert!(!store
        .replace_if_unchanged("otc:abc", "stale", Replacement::Delete)
        .await
        .unwrap());

    assert!(store
        .replace_if_unchanged(
            "otc:abc",
            "v1",
            Replacement::Update {
                value: "v2".to_string(),
                ttl_seconds: 120,
            },
        )
        .await
        .unwrap());
    assert_eq!(store.get("otc:abc").await.unwrap().as_deref(), Some("v2"));
    assert!(store.remaining_ttl("otc:abc").await.unwrap().unwrap() <= 120);

    assert!(store
        .replace_if_unchanged("otc:abc", "v2", Replacement::Delete)
        .await
        .unwrap());
    assert!(!store
        .replace_if_unchanged("otc:abc", "v2", Replacement::Delete)
        .await
        .unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_lifecycle_on_redis() {
    let store = Arc::new(store("lifecycle").await);
    let service = OtcService::new(store.clone(), OtcServiceConfig::default());

    let issued = service.issue("Redis-User").await.unwrap();

    assert_eq!(
        service.verify("redis-user", "not-it").await.unwrap(),
        VerificationOutcome::InvalidCode {
            remaining_attempts: 2
        }
    );
    assert_eq!(
        service.verify("redis-user", &issued.code).await.unwrap(),
        VerificationOutcome::Verified
    );
    assert_eq!(
        service.verify("redis-user", &issued.code).await.unwrap(),
        VerificationOutcome::NotFound
    );
}
