//! Redis-backed code store

use async_trait::async_trait;
use otc_core::{DomainResult, ExpiringStore, Replacement};

use super::redis_client::{RedisClient, ScriptReplacement};

/// Code store on Redis with server-side TTL and an atomic replace script
#[derive(Clone)]
pub struct RedisOtcStore {
    client: RedisClient,
}

impl RedisOtcStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }

    /// Check the backing connection
    pub async fn health_check(&self) -> DomainResult<bool> {
        Ok(self.client.health_check().await?)
    }
}

#[async_trait]
impl ExpiringStore for RedisOtcStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        Ok(self
            .client
            .set_with_expiry(&self.key(key), value, ttl_seconds.max(1))
            .await?)
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.client.get(&self.key(key)).await?)
    }

    async fn remaining_ttl(&self, key: &str) -> DomainResult<Option<u64>> {
        let ttl = self.client.ttl(&self.key(key)).await?;
        Ok(ttl.and_then(|t| u64::try_from(t).ok()))
    }

    async fn delete(&self, key: &str) -> DomainResult<bool> {
        Ok(self.client.delete(&self.key(key)).await?)
    }

    async fn replace_if_unchanged(
        &self,
        key: &str,
        expected: &str,
        replacement: Replacement,
    ) -> DomainResult<bool> {
        let key = self.key(key);
        let applied = match &replacement {
            Replacement::Delete => {
                self.client
                    .compare_and_replace(&key, expected, ScriptReplacement::Delete)
                    .await?
            }
            Replacement::Update { value, ttl_seconds } => {
                self.client
                    .compare_and_replace(
                        &key,
                        expected,
                        ScriptReplacement::Set {
                            value,
                            expiry_seconds: *ttl_seconds,
                        },
                    )
                    .await?
            }
        };
        Ok(applied)
    }

    fn backend_name(&self) -> &str {
        "redis"
    }
}
