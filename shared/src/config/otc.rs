//! One-time code configuration module

use serde::{Deserialize, Serialize};

use super::parse_env;

/// Default number of digits in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default code lifetime in seconds (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Default number of failed verifications allowed per code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Longest accepted code lifetime in seconds (one day)
pub const MAX_TTL_SECONDS: u64 = 86_400;

/// Accepted range for the code length
pub const CODE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=10;

/// Tunables of the one-time code lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtcConfig {
    /// Number of decimal digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a code stays verifiable after issue
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Failed verifications allowed before the code is exhausted
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for OtcConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtcConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            code_length: parse_env("OTC_CODE_LENGTH", DEFAULT_CODE_LENGTH)?,
            ttl_seconds: parse_env("OTC_TTL_SECONDS", DEFAULT_TTL_SECONDS)?,
            max_attempts: parse_env("OTC_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
        })
    }

    /// Set the code length
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// Set the code lifetime
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// Set the attempt limit
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Check that every tunable is usable
    pub fn validate(&self) -> Result<(), String> {
        if !CODE_LENGTH_RANGE.contains(&self.code_length) {
            return Err(format!(
                "OTC code length must be between {} and {}, got {}",
                CODE_LENGTH_RANGE.start(),
                CODE_LENGTH_RANGE.end(),
                self.code_length
            ));
        }
        if self.ttl_seconds == 0 {
            return Err("OTC ttl must be at least 1 second".to_string());
        }
        if self.ttl_seconds > MAX_TTL_SECONDS {
            return Err(format!(
                "OTC ttl must be at most {} seconds, got {}",
                MAX_TTL_SECONDS, self.ttl_seconds
            ));
        }
        if self.max_attempts == 0 {
            return Err("OTC max attempts must be at least 1".to_string());
        }
        Ok(())
    }

    /// Code lifetime in whole minutes, rounded up, for user-facing messages
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_seconds.div_ceil(60)
    }
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_TTL_SECONDS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
