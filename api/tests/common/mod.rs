//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use otc_core::{
    Clock, CodeDispatcher, DomainError, DomainResult, ExpiringStore, InMemoryUserDirectory,
    OtcService, OtcServiceConfig, PasscodeService, Replacement,
};
use otc_infra::MemoryOtcStore;
use otc_shared::DirectoryConfig;

use otc_api::AppState;

pub type TestState<S> = AppState<InMemoryUserDirectory, S, Outbox>;

/// Dispatcher that records every message instead of sending it
#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl Outbox {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn last_code_for(&self, destination: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == destination)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDispatcher for Outbox {
    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        _valid_for_secs: u64,
    ) -> Result<String, String> {
        if self.fail {
            return Err("gateway unreachable".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((destination.to_string(), code.to_string()));
        Ok(format!("outbox-{}", sent.len()))
    }

    fn channel_name(&self) -> &str {
        "sms"
    }
}

/// Clock moved by hand
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        *self.now.lock().unwrap() += Duration::seconds(secs);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Store that fails every call
pub struct DownStore;

#[async_trait]
impl ExpiringStore for DownStore {
    async fn put(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> DomainResult<()> {
        Err(DomainError::storage("connection refused"))
    }

    async fn get(&self, _key: &str) -> DomainResult<Option<String>> {
        Err(DomainError::storage("connection refused"))
    }

    async fn remaining_ttl(&self, _key: &str) -> DomainResult<Option<u64>> {
        Err(DomainError::storage("connection refused"))
    }

    async fn delete(&self, _key: &str) -> DomainResult<bool> {
        Err(DomainError::storage("connection refused"))
    }

    async fn replace_if_unchanged(
        &self,
        _key: &str,
        _expected: &str,
        _replacement: Replacement,
    ) -> DomainResult<bool> {
        Err(DomainError::storage("connection refused"))
    }

    fn backend_name(&self) -> &str {
        "down"
    }
}

pub fn directory() -> Arc<InMemoryUserDirectory> {
    let config = DirectoryConfig::parse("abc=+11111111111,nophone=").unwrap();
    Arc::new(InMemoryUserDirectory::from_config(&config))
}

pub struct Harness {
    pub state: TestState<MemoryOtcStore>,
    pub outbox: Arc<Outbox>,
    pub clock: Arc<TestClock>,
}

pub fn harness() -> Harness {
    harness_with_outbox(Outbox::default())
}

pub fn harness_with_outbox(outbox: Outbox) -> Harness {
    let outbox = Arc::new(outbox);
    let clock = Arc::new(TestClock::new());
    let otc = OtcService::new(Arc::new(MemoryOtcStore::new()), OtcServiceConfig::default())
        .with_clock(clock.clone());
    let service = PasscodeService::new(directory(), otc, outbox.clone());

    Harness {
        state: AppState::new(Arc::new(service)),
        outbox,
        clock,
    }
}

pub fn down_state() -> TestState<DownStore> {
    let otc = OtcService::new(Arc::new(DownStore), OtcServiceConfig::default());
    let service = PasscodeService::new(directory(), otc, Arc::new(Outbox::default()));
    AppState::new(Arc::new(service))
}
