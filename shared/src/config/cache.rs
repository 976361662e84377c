//! Code store configuration module

use serde::{Deserialize, Serialize};

use super::parse_env;

/// Storage backend holding the one-time code records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Redis with server-side TTL and atomic scripts
    Redis,
    /// In-process map, single instance only
    Memory,
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Memory
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Code store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Which backend holds the records
    #[serde(default)]
    pub backend: StoreBackend,

    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds, applied to every store call
    pub response_timeout: u64,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Namespace prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 2,
            connect_retries: default_connect_retries(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let backend = match std::env::var("OTC_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.backend,
        };
        let key_prefix = std::env::var("REDIS_KEY_PREFIX")
            .ok()
            .filter(|prefix| !prefix.trim().is_empty());

        Ok(Self {
            backend,
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: parse_env(
                "REDIS_CONNECTION_TIMEOUT_SECS",
                defaults.connection_timeout,
            )?,
            response_timeout: parse_env("REDIS_RESPONSE_TIMEOUT_SECS", defaults.response_timeout)?,
            connect_retries: parse_env("REDIS_CONNECT_RETRIES", defaults.connect_retries)?,
            key_prefix,
        })
    }

    /// Create a new Redis-backed configuration with URL
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all store keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a store key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

fn default_connect_retries() -> u32 {
    3
}
