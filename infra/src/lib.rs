//! # Infrastructure Layer
//!
//! Concrete implementations of the traits defined in `otc_core`:
//! - **Cache**: Redis client, Redis-backed and in-process code stores
//! - **SMS**: SMS providers (Twilio over HTTP, mock) and the code dispatcher
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS provider (default)

use otc_core::DomainError;

/// Cache module - Redis client and code stores
pub mod cache;

/// Configuration module for infrastructure services
pub mod config;

/// SMS service module - External SMS providers
pub mod sms;

pub use cache::{create_store, MemoryOtcStore, RedisClient, RedisOtcStore};
pub use config::SmsConfig;
pub use sms::{create_sms_service, MockSmsService, SmsCodeDispatcher, SmsService};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Backend did not answer in time
    #[error("Timed out after {seconds}s during {operation}")]
    Timeout { operation: String, seconds: u64 },

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Cache(_) | InfrastructureError::Timeout { .. } => {
                DomainError::StorageUnavailable {
                    message: error.to_string(),
                }
            }
            InfrastructureError::Http(_) | InfrastructureError::Sms(_) => {
                DomainError::DeliveryFailed {
                    message: error.to_string(),
                }
            }
            InfrastructureError::Config(_) | InfrastructureError::General(_) => {
                DomainError::Internal {
                    message: error.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_storage_unavailable() {
        let error = InfrastructureError::Timeout {
            operation: "GET".to_string(),
            seconds: 2,
        };
        assert!(matches!(
            DomainError::from(error),
            DomainError::StorageUnavailable { .. }
        ));

        let redis_error = redis::RedisError::from((redis::ErrorKind::IoError, "connection reset"));
        assert!(matches!(
            DomainError::from(InfrastructureError::from(redis_error)),
            DomainError::StorageUnavailable { .. }
        ));
    }

    #[test]
    fn test_sms_errors_map_to_delivery_failed() {
        let error = InfrastructureError::Sms("gateway rejected message".to_string());
        match DomainError::from(error) {
            DomainError::DeliveryFailed { message } => {
                assert!(message.contains("gateway rejected message"))
            }
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_config_errors_map_to_internal() {
        let error = InfrastructureError::Config("missing sid".to_string());
        assert!(matches!(
            DomainError::from(error),
            DomainError::Internal { .. }
        ));
    }
}
