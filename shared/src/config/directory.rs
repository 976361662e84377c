//! Seed configuration for the in-memory user directory

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User id to phone number entries loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Delivery addresses keyed by lower-cased user id
    pub users: BTreeMap<String, String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        let mut users = BTreeMap::new();
        users.insert("abc".to_string(), "+11111111111".to_string());
        Self { users }
    }
}

impl DirectoryConfig {
    /// Create from the `OTC_USERS` variable (`id=+phone,id2=+phone2`)
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("OTC_USERS") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parse a comma separated list of `id=phone` pairs
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut users = BTreeMap::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (user_id, phone) = entry
                .split_once('=')
                .ok_or_else(|| format!("Invalid directory entry (expected id=phone): {}", entry))?;
            let user_id = user_id.trim().to_lowercase();
            if user_id.is_empty() {
                return Err(format!("Directory entry has an empty user id: {}", entry));
            }
            users.insert(user_id, phone.trim().to_string());
        }
        Ok(Self { users })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed() {
        let config = DirectoryConfig::default();
        assert_eq!(config.users.get("abc").map(String::as_str), Some("+11111111111"));
    }

    #[test]
    fn test_parse_lowercases_ids() {
        let config = DirectoryConfig::parse("Alice=+14155552671, bob = +442071838750,").unwrap();
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users["alice"], "+14155552671");
        assert_eq!(config.users["bob"], "+442071838750");
    }

    #[test]
    fn test_parse_allows_entry_without_phone() {
        let config = DirectoryConfig::parse("nophone=").unwrap();
        assert_eq!(config.users["nophone"], "");
    }

    #[test]
    fn test_parse_rejects_malformed_entries() {
        assert!(DirectoryConfig::parse("alice").is_err());
        assert!(DirectoryConfig::parse("=+14155552671").is_err());
    }
}
