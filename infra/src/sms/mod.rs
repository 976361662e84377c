//! SMS Service Module
//!
//! SMS providers for delivering one-time codes and the adapter plugging
//! them into the core as a [`CodeDispatcher`](otc_core::CodeDispatcher).

pub mod dispatcher;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use dispatcher::SmsCodeDispatcher;
pub use mock_sms::MockSmsService;
pub use sms_service::{verification_message, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

use crate::config::SmsConfig;
use crate::InfrastructureError;

/// Create an SMS service based on configuration
///
/// A misconfigured provider is an error; there is no fallback to the mock.
pub fn create_sms_service(config: &SmsConfig) -> Result<Box<dyn SmsService>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => {
            tracing::info!(provider = "mock", "Using mock SMS service");
            Ok(Box::new(MockSmsService::with_options(
                config.mock_console_output,
                false,
            )))
        }
        #[cfg(feature = "twilio-sms")]
        "twilio" => {
            let twilio_config = TwilioConfig::from_sms_config(config)?;
            Ok(Box::new(TwilioSmsService::new(twilio_config)?))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown SMS provider: {}",
            other
        ))),
    }
}
