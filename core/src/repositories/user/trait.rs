//! User directory trait resolving user identifiers to delivery addresses.
//!
//! The directory is read-only from the point of view of this service; how
//! entries get there is a concern of whoever owns the directory.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Directory entry for a known user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContact {
    /// Normalized user identifier
    pub user_id: String,

    /// E.164 phone number, if one is registered
    pub phone: Option<String>,
}

impl UserContact {
    pub fn new(user_id: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            phone,
        }
    }
}

/// Lookup of delivery addresses by user identifier
///
/// `Ok(None)` means the user is unknown. A known user without an address is
/// `Ok(Some(contact))` with `contact.phone == None`.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the contact entry for an already normalized user identifier
    async fn find_contact(&self, user_id: &str) -> DomainResult<Option<UserContact>>;
}
