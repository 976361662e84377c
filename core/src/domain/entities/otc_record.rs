//! One-time code record entity.
//!
//! A record is the whole state kept per user identifier between issue and
//! the terminal verification outcome. It is stored as one JSON value so that
//! the store can compare and replace it atomically.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DomainError, DomainResult};

/// Key namespace separating code records from other data in the same store
pub const OTC_KEY_NAMESPACE: &str = "otc";

/// Per-user one-time code state
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtcRecord {
    /// Normalized (lower-cased) user identifier
    pub user_id: String,

    /// The secret numeric code
    pub code: String,

    /// When the code was issued
    pub issued_at: DateTime<Utc>,

    /// When the code stops being verifiable
    pub expires_at: DateTime<Utc>,

    /// Failed verification attempts against this record
    pub attempts: u32,
}

impl OtcRecord {
    /// Creates a fresh record issued at the given instant
    ///
    /// Fails with [`DomainError::Internal`] when the deadline falls outside
    /// the representable date range.
    pub fn issued_at(
        user_id: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl_seconds: u64,
    ) -> DomainResult<Self> {
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| DomainError::Internal {
                message: format!("Code lifetime of {}s is out of range", ttl_seconds),
            })?;

        Ok(Self {
            user_id: user_id.into(),
            code: code.into(),
            issued_at,
            expires_at,
            attempts: 0,
        })
    }

    /// Store key for a normalized user identifier
    pub fn store_key(user_id: &str) -> String {
        format!("{}:{}", OTC_KEY_NAMESPACE, user_id)
    }

    /// Whether the record is past its deadline at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether no failed attempts are left
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Exact, digit-for-digit comparison in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Copy of this record with one more failed attempt
    pub fn with_failed_attempt(&self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self.clone()
        }
    }

    /// Attempts left before the record is exhausted
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Whole seconds until the deadline, rounded up, zero once lapsed
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.expires_at - now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(1000)
        }
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a stored value
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

// The code is a bearer secret and must never reach a log line.
impl fmt::Debug for OtcRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtcRecord")
            .field("user_id", &self.user_id)
            .field("code", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .field("attempts", &self.attempts)
            .finish()
    }
}
