//! Configuration for infrastructure services that live outside `otc_shared`

use serde::{Deserialize, Serialize};

use crate::InfrastructureError;

/// SMS service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    pub provider: String,
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: String,
    /// Sender phone number (E.164)
    pub from_number: String,
    /// Timeout for provider API requests in seconds
    pub request_timeout_secs: u64,
    /// Print mock messages, code included, to stdout
    pub mock_console_output: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            request_timeout_secs: 10,
            mock_console_output: false,
        }
    }
}

impl SmsConfig {
    /// Load from `SMS_PROVIDER`, `TWILIO_*` and `SMS_MOCK_CONSOLE`
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let defaults = Self::default();
        let request_timeout_secs = match std::env::var("TWILIO_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                InfrastructureError::Config(format!(
                    "TWILIO_REQUEST_TIMEOUT_SECS is not a number: {}",
                    raw
                ))
            })?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self {
            provider: std::env::var("SMS_PROVIDER")
                .map(|p| p.trim().to_lowercase())
                .unwrap_or(defaults.provider),
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default(),
            request_timeout_secs,
            mock_console_output: std::env::var("SMS_MOCK_CONSOLE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.mock_console_output),
        })
    }

    /// A mock provider configuration
    pub fn mock() -> Self {
        Self::default()
    }
}

// Credentials stay out of debug output
impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("provider", &self.provider)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"****")
            .field("from_number", &self.from_number)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("mock_console_output", &self.mock_console_output)
            .finish()
    }
}
