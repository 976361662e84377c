//! Configuration for the code lifecycle manager

use otc_shared::config::otc::{DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_TTL_SECONDS};
use otc_shared::OtcConfig;

/// Extra store lifetime beyond a code's deadline.
///
/// Lapsed records stay readable for this long so that a late verify is
/// answered with `Expired` rather than `NotFound`.
pub const STORE_EXPIRY_GRACE_SECONDS: u64 = 60;

/// Compare-and-swap rounds a single verify may lose before giving up
pub const MAX_COMMIT_ROUNDS: usize = 5;

/// Configuration for the code lifecycle manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtcServiceConfig {
    /// Number of digits in a generated code
    pub code_length: usize,
    /// Seconds a code stays verifiable after issue
    pub ttl_seconds: u64,
    /// Failed attempts allowed before the record is exhausted
    pub max_attempts: u32,
}

impl Default for OtcServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl From<&OtcConfig> for OtcServiceConfig {
    fn from(config: &OtcConfig) -> Self {
        Self {
            code_length: config.code_length,
            ttl_seconds: config.ttl_seconds,
            max_attempts: config.max_attempts,
        }
    }
}

impl OtcServiceConfig {
    /// TTL handed to the store when a record is first written
    pub fn store_ttl_seconds(&self) -> u64 {
        self.ttl_seconds.saturating_add(STORE_EXPIRY_GRACE_SECONDS)
    }
}
