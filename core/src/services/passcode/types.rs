//! Types for passcode service results

use chrono::{DateTime, Utc};

/// Result of sending a code to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCodeResult {
    /// Normalized user identifier
    pub user_id: String,
    /// Address the code was delivered to
    pub destination: String,
    /// Delivery channel name
    pub channel: String,
    /// Provider message id
    pub message_id: String,
    /// When the delivered code stops being verifiable
    pub expires_at: DateTime<Utc>,
}
