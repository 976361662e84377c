//! Traits for storage and delivery integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainResult;

/// What to do with a key whose value still matches the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Remove the key
    Delete,
    /// Overwrite the value with a new time-to-live
    Update { value: String, ttl_seconds: u64 },
}

/// Key-value store whose entries carry a time-to-live
///
/// Implementations map their own failures to
/// [`DomainError::StorageUnavailable`](crate::errors::DomainError::StorageUnavailable).
/// A store may decline to enforce TTL; callers keep their own deadline.
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Write `value` under `key`, replacing any existing value
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()>;

    /// Read the value under `key`
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Seconds before `key` lapses, `None` if absent or without TTL
    async fn remaining_ttl(&self, key: &str) -> DomainResult<Option<u64>>;

    /// Remove `key`, reporting whether it existed
    async fn delete(&self, key: &str) -> DomainResult<bool>;

    /// Atomically apply `replacement` if `key` currently holds exactly `expected`
    ///
    /// Returns `false`, without touching the key, when the value differs or
    /// the key is gone.
    async fn replace_if_unchanged(
        &self,
        key: &str,
        expected: &str,
        replacement: Replacement,
    ) -> DomainResult<bool>;

    /// Short backend name for health output and logs
    fn backend_name(&self) -> &str;
}

/// Outbound channel that delivers a code to an address
#[async_trait]
pub trait CodeDispatcher: Send + Sync {
    /// Send `code` to `destination`, returning the provider message id
    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        valid_for_secs: u64,
    ) -> Result<String, String>;

    /// Channel name, e.g. "sms"
    fn channel_name(&self) -> &str;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
