//! SMS Service Interface
//!
//! Defines the trait for SMS providers that deliver one-time codes.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio Messages API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a one-time code using the standard message text
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
        valid_for_secs: u64,
    ) -> Result<String, InfrastructureError> {
        let message = verification_message(code, valid_for_secs);
        self.send_sms(phone_number, &message).await
    }

    /// Get the service provider name ("Twilio", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    async fn is_available(&self) -> bool {
        true
    }
}

/// Message body carrying a code valid for `valid_for_secs`
pub fn verification_message(code: &str, valid_for_secs: u64) -> String {
    let minutes = valid_for_secs.div_ceil(60).max(1);
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!(
        "Your verification code is: {}. This code expires in {} {}.",
        code, minutes, unit
    )
}
