//! Configuration module with service-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Code store backend selection and Redis configuration
//! - `directory` - Seed entries for the in-memory user directory
//! - `environment` - Environment detection and logging configuration
//! - `otc` - One-time code tunables (length, ttl, attempts)
//! - `server` - HTTP server configuration

pub mod cache;
pub mod directory;
pub mod environment;
pub mod otc;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::{CacheConfig, StoreBackend};
pub use directory::DirectoryConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otc::OtcConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Code store configuration
    pub cache: CacheConfig,

    /// One-time code tunables
    pub otc: OtcConfig,

    /// Seeded user directory
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            otc: OtcConfig::default(),
            directory: DirectoryConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, String> {
        let environment = Environment::from_env();
        let otc = OtcConfig::from_env()?;
        otc.validate()?;

        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env()?,
            otc,
            directory: DirectoryConfig::from_env()?,
            logging: LoggingConfig::from_env(environment),
        })
    }
}

/// Read an optional environment variable and parse it, keeping `default` when unset
pub(crate) fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
