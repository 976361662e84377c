//! In-memory user directory seeded from configuration

use async_trait::async_trait;
use otc_shared::DirectoryConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainResult;

use super::trait_::{UserContact, UserDirectory};

/// User directory backed by a map held in process memory
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding the configured entries
    pub fn from_config(config: &DirectoryConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|(user_id, phone)| (user_id.to_lowercase(), phone.trim().to_string()))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Register or replace an entry; an empty phone records a user without address
    pub async fn insert(&self, user_id: &str, phone: &str) {
        self.users
            .write()
            .await
            .insert(user_id.to_lowercase(), phone.trim().to_string());
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_contact(&self, user_id: &str) -> DomainResult<Option<UserContact>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).map(|phone| {
            let phone = (!phone.is_empty()).then(|| phone.clone());
            UserContact::new(user_id, phone)
        }))
    }
}
