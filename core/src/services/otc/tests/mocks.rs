//! Mock implementations for testing the code lifecycle

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::{DomainError, DomainResult};
use crate::services::otc::{Clock, CodeDispatcher, CodeGenerator, ExpiringStore, Replacement};

// Mock store: values with the TTL they were written with. TTL is recorded,
// never enforced, so expiry must come from the record itself.
pub struct MockStore {
    pub entries: Mutex<HashMap<String, (String, u64)>>,
    pub should_fail: AtomicBool,
    pub reports_ttl: bool,
    pub always_conflict: bool,
    pub put_calls: AtomicUsize,
    pub replace_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            should_fail: AtomicBool::new(false),
            reports_ttl: true,
            always_conflict: false,
            put_calls: AtomicUsize::new(0),
            replace_calls: AtomicUsize::new(0),
        }
    }

    /// Store that never reports a remaining TTL
    pub fn without_ttl() -> Self {
        Self {
            reports_ttl: false,
            ..Self::new()
        }
    }

    /// Store whose conditional replace always loses
    pub fn conflicting() -> Self {
        Self {
            always_conflict: true,
            ..Self::new()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    pub fn ttl_of(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn insert_raw(&self, key: &str, value: &str, ttl: u64) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
    }

    fn check(&self) -> DomainResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::storage("mock store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ExpiringStore for MockStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        self.check()?;
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        self.insert_raw(key, value, ttl_seconds);
        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        self.check()?;
        Ok(self.raw(key))
    }

    async fn remaining_ttl(&self, key: &str) -> DomainResult<Option<u64>> {
        self.check()?;
        if !self.reports_ttl {
            return Ok(None);
        }
        Ok(self.ttl_of(key))
    }

    async fn delete(&self, key: &str) -> DomainResult<bool> {
        self.check()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn replace_if_unchanged(
        &self,
        key: &str,
        expected: &str,
        replacement: Replacement,
    ) -> DomainResult<bool> {
        self.check()?;
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        if self.always_conflict {
            return Ok(false);
        }

        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((current, _)) if current == expected => {}
            _ => return Ok(false),
        }
        match replacement {
            Replacement::Delete => {
                entries.remove(key);
            }
            Replacement::Update { value, ttl_seconds } => {
                entries.insert(key.to_string(), (value, ttl_seconds));
            }
        }
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

// Mock dispatcher capturing every delivered code
pub struct MockDispatcher {
    pub sent: Mutex<Vec<(String, String, u64)>>,
    pub should_fail: bool,
}

impl MockDispatcher {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail,
        }
    }

    pub fn last_code_for(&self, destination: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(d, _, _)| d == destination)
            .map(|(_, code, _)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDispatcher for MockDispatcher {
    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        valid_for_secs: u64,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("SMS gateway error".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((destination.to_string(), code.to_string(), valid_for_secs));
        Ok(format!("mock-msg-{}", sent.len()))
    }

    fn channel_name(&self) -> &str {
        "mock"
    }
}

// Clock moved by hand
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        *self.now.lock().unwrap() += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// Generator handing out queued codes
pub struct SequenceGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self, length: usize) -> DomainResult<String> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "0".repeat(length)))
    }
}

// Generator whose entropy source is gone
pub struct BrokenGenerator;

impl CodeGenerator for BrokenGenerator {
    fn generate(&self, _length: usize) -> DomainResult<String> {
        Err(DomainError::EntropyUnavailable {
            message: "getrandom: device not available".to_string(),
        })
    }
}
