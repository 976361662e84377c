//! Redis client implementation
//!
//! Wraps a multiplexed async connection with a per-call response timeout,
//! connection retry at startup and retry of idempotent commands. The
//! compare-and-swap script is never retried: a lost reply may hide an
//! applied write.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult, Script};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use otc_shared::CacheConfig;

use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

// Compare the current value with ARGV[1]; on a match either delete the key
// or overwrite it with ARGV[3] for ARGV[4] seconds.
const COMPARE_AND_REPLACE_LUA: &str = r#"
local current = redis.call('GET', KEYS[1])
if current ~= ARGV[1] then
    return 0
end
if ARGV[2] == 'del' then
    redis.call('DEL', KEYS[1])
else
    redis.call('SET', KEYS[1], ARGV[3], 'EX', tonumber(ARGV[4]))
end
return 1
"#;

/// Change applied by [`RedisClient::compare_and_replace`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptReplacement<'a> {
    Delete,
    Set { value: &'a str, expiry_seconds: u64 },
}

/// Redis client with timeouts and retry logic
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum attempts for idempotent operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
    /// Atomic compare-and-replace script
    compare_and_replace: Script,
}

impl RedisClient {
    /// Connect using the retry settings of `config`
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let retries = config.connect_retries.max(1);
        Self::new_with_retry_config(config, retries, 100).await
    }

    /// Connect with custom retry configuration
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout.max(1)),
            max_retries,
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries: max_retries.max(1),
            retry_delay_ms,
            compare_and_replace: Script::new(COMPARE_AND_REPLACE_LUA),
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Attempting to connect to Redis");

            let result = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout {
                    operation: "connect".to_string(),
                    seconds: connect_timeout.as_secs(),
                }),
            };

            match result {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries = max_retries,
                        error = %e,
                        retry_in_ms = delay,
                        "Failed to connect to Redis, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(attempts = attempts, error = %e, "Failed to connect to Redis");
                    return Err(e);
                }
            }
        }
    }

    /// Configuration the client was created with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value with expiration time
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!(key = key, expiry_seconds = expiry_seconds, "SET EX");

        self.execute_with_retry("SET", |mut conn| {
            let key = key.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
    }

    /// Get a value, `None` if absent
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!(key = key, "GET");

        self.execute_with_retry("GET", |mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
    }

    /// Delete a key, reporting whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        debug!(key = key, "DEL");

        let deleted = self
            .execute_with_retry("DEL", |mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;
        Ok(deleted > 0)
    }

    /// Time-to-live in seconds, `None` if the key is absent or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        debug!(key = key, "TTL");

        let ttl = self
            .execute_with_retry("TTL", |mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await?;

        // -1: no expiry, -2: no key
        Ok((ttl >= 0).then_some(ttl))
    }

    /// Atomically apply `replacement` if `key` holds exactly `expected`
    pub async fn compare_and_replace(
        &self,
        key: &str,
        expected: &str,
        replacement: ScriptReplacement<'_>,
    ) -> Result<bool, InfrastructureError> {
        debug!(key = key, "EVALSHA compare_and_replace");

        let mut invocation = self.compare_and_replace.key(key);
        invocation.arg(expected);
        match replacement {
            ScriptReplacement::Delete => {
                invocation.arg("del").arg("").arg(0u64);
            }
            ScriptReplacement::Set {
                value,
                expiry_seconds,
            } => {
                invocation.arg("set").arg(value).arg(expiry_seconds.max(1));
            }
        }

        let mut conn = self.connection.clone();
        let applied: i64 = self
            .with_timeout("compare_and_replace", invocation.invoke_async(&mut conn))
            .await?;
        Ok(applied == 1)
    }

    /// Check the connection with PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!(response = %response, "Redis health check returned unexpected response");
            Ok(false)
        }
    }

    async fn with_timeout<T, F>(&self, operation: &str, future: F) -> Result<T, InfrastructureError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        let limit = Duration::from_secs(self.config.response_timeout.max(1));
        match timeout(limit, future).await {
            Ok(result) => result.map_err(|e| {
                error!(operation = operation, error = %e, "Redis operation failed");
                InfrastructureError::Cache(e)
            }),
            Err(_) => {
                error!(operation = operation, "Redis operation timed out");
                Err(InfrastructureError::Timeout {
                    operation: operation.to_string(),
                    seconds: limit.as_secs(),
                })
            }
        }
    }

    /// Run an idempotent operation, retrying transient failures with backoff
    async fn execute_with_retry<F, T>(&self, operation: &str, command: F) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            match self.with_timeout(operation, command(self.connection.clone())).await {
                Ok(result) => return Ok(result),
                Err(InfrastructureError::Cache(e))
                    if attempts < self.max_retries && is_retriable_error(&e) =>
                {
                    warn!(
                        operation = operation,
                        attempt = attempts,
                        max_retries = self.max_retries,
                        error = %e,
                        "Redis operation failed, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether an error is transient and the operation may be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
