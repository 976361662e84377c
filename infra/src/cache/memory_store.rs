//! In-process code store
//!
//! Suitable for a single instance and for tests. Entries lapse on the tokio
//! clock, so paused-time tests can move past a TTL without sleeping.

use async_trait::async_trait;
use otc_core::{DomainResult, ExpiringStore, Replacement};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

// Map size above which a write sweeps out lapsed entries
const PURGE_THRESHOLD: usize = 1024;

// Longest TTL an entry is given; larger requests are clamped
const MAX_ENTRY_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn new(value: String, ttl_seconds: u64) -> Self {
        let ttl = Duration::from_secs(ttl_seconds).min(MAX_ENTRY_TTL);
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Code store holding entries in process memory
#[derive(Clone, Default)]
pub struct MemoryOtcStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryOtcStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every lapsed entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of entries, lapsed ones included until purged
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

fn live_entry<'a>(entries: &'a mut HashMap<String, Entry>, key: &str) -> Option<&'a Entry> {
    let now = Instant::now();
    if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
        entries.remove(key);
    }
    entries.get(key)
}

#[async_trait]
impl ExpiringStore for MemoryOtcStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.len() >= PURGE_THRESHOLD {
            let now = Instant::now();
            entries.retain(|_, entry| entry.is_live(now));
        }
        entries.insert(key.to_string(), Entry::new(value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        Ok(live_entry(&mut entries, key).map(|entry| entry.value.clone()))
    }

    async fn remaining_ttl(&self, key: &str) -> DomainResult<Option<u64>> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        Ok(live_entry(&mut entries, key)
            .map(|entry| entry.expires_at.saturating_duration_since(now).as_secs()))
    }

    async fn delete(&self, key: &str) -> DomainResult<bool> {
        let mut entries = self.entries.lock().await;
        let existed = live_entry(&mut entries, key).is_some();
        entries.remove(key);
        Ok(existed)
    }

    async fn replace_if_unchanged(
        &self,
        key: &str,
        expected: &str,
        replacement: Replacement,
    ) -> DomainResult<bool> {
        let mut entries = self.entries.lock().await;
        if live_entry(&mut entries, key).map(|entry| entry.value.as_str()) != Some(expected) {
            return Ok(false);
        }

        match replacement {
            Replacement::Delete => {
                entries.remove(key);
            }
            Replacement::Update { value, ttl_seconds } => {
                entries.insert(key.to_string(), Entry::new(value, ttl_seconds));
            }
        }
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
