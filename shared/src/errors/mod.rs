//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes carried in the `error_type` / `error` fields of responses
pub mod error_codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const EXPIRED: &str = "expired";
    pub const TOO_MANY_ATTEMPTS: &str = "too_many_attempts";
    pub const INVALID_CODE: &str = "invalid_code";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const ADDRESS_NOT_FOUND: &str = "address_not_found";
    pub const DELIVERY_FAILED: &str = "delivery_failed";
    pub const STORAGE_UNAVAILABLE: &str = "storage_unavailable";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
