//! Types for code lifecycle results

use chrono::{DateTime, Utc};
use std::fmt;

/// Result of a single verification call
///
/// Every variant is a normal answer to the caller; faults are reported
/// through [`DomainError`](crate::errors::DomainError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Code matched; the record is consumed
    Verified,
    /// No live record for the user
    NotFound,
    /// The record was past its deadline; it is consumed
    Expired,
    /// No attempts were left; the record is consumed
    Exhausted,
    /// Code did not match
    InvalidCode { remaining_attempts: u32 },
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Attempts left, for outcomes that carry a count
    pub fn remaining_attempts(&self) -> Option<u32> {
        match self {
            Self::InvalidCode { remaining_attempts } => Some(*remaining_attempts),
            _ => None,
        }
    }

    /// Name used in structured log events
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::Exhausted => "exhausted",
            Self::InvalidCode { .. } => "invalid_code",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freshly issued code, handed only to the delivery path
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Normalized user identifier
    pub user_id: String,
    /// The code to deliver
    pub code: String,
    /// Deadline after which verification answers `Expired`
    pub expires_at: DateTime<Utc>,
}

impl IssuedCode {
    /// Whole seconds the code stays valid from `now`
    pub fn valid_for_secs(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.expires_at - now).num_milliseconds();
        if millis <= 0 {
            0
        } else {
            (millis as u64).div_ceil(1000)
        }
    }
}

impl fmt::Debug for IssuedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedCode")
            .field("user_id", &self.user_id)
            .field("code", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
