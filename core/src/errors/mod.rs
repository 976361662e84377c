//! Domain-specific error types and error handling.
//!
//! Verification outcomes (not found, expired, exhausted, wrong code) are
//! values of [`crate::services::VerificationOutcome`], not errors. This enum
//! only carries faults and request-level rejections.

use otc_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Secure random source unavailable: {message}")]
    EntropyUnavailable { message: String },

    #[error("Code delivery failed: {message}")]
    DeliveryFailed { message: String },

    #[error("User not found")]
    UserNotFound,

    #[error("No delivery address registered for user")]
    AddressNotFound,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a storage fault
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Shorthand for a request validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => error_codes::STORAGE_UNAVAILABLE,
            Self::EntropyUnavailable { .. } | Self::Internal { .. } => error_codes::INTERNAL_ERROR,
            Self::DeliveryFailed { .. } => error_codes::DELIVERY_FAILED,
            Self::UserNotFound => error_codes::USER_NOT_FOUND,
            Self::AddressNotFound => error_codes::ADDRESS_NOT_FOUND,
            Self::Validation { .. } => error_codes::VALIDATION_ERROR,
        }
    }

    /// Whether the error comes from a backing system rather than the request
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable { .. }
                | Self::EntropyUnavailable { .. }
                | Self::DeliveryFailed { .. }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
