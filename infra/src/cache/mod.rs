//! Cache module for code storage
//!
//! Provides the Redis client and the two [`ExpiringStore`] backends. The
//! backend is chosen once at startup from configuration; an unreachable
//! Redis is a startup error, never a silent switch to process memory.

pub mod memory_store;
pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

use otc_core::ExpiringStore;
use otc_shared::{CacheConfig, StoreBackend};
use std::sync::Arc;

use crate::InfrastructureError;

pub use memory_store::MemoryOtcStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisOtcStore;

/// Build the configured code store
pub async fn create_store(
    config: &CacheConfig,
) -> Result<Arc<dyn ExpiringStore>, InfrastructureError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!(backend = "memory", "Using in-process code store");
            Ok(Arc::new(MemoryOtcStore::new()))
        }
        StoreBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            if !client.health_check().await? {
                return Err(InfrastructureError::General(
                    "Redis did not answer PING".to_string(),
                ));
            }
            tracing::info!(
                backend = "redis",
                key_prefix = config.key_prefix.as_deref().unwrap_or(""),
                "Using Redis code store"
            );
            Ok(Arc::new(RedisOtcStore::new(client)))
        }
    }
}
