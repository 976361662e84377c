//! Shared utilities and common types for the OTC service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structure and error codes
//! - Utility functions (phone masking, user id normalization)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DirectoryConfig, Environment, LogFormat, LoggingConfig, OtcConfig,
    ServerConfig, StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{identity, phone};
