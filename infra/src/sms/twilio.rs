//! Twilio SMS Service Implementation
//!
//! Sends messages with one HTTPS POST to the Twilio Messages API. Failed
//! sends are reported, not retried.

use async_trait::async_trait;
use otc_shared::phone::{is_valid_international_phone, mask_phone_number};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use super::sms_service::SmsService;
use crate::config::SmsConfig;
use crate::InfrastructureError;

const TWILIO_API_BASE_URL: &str = "https://api.twilio.com/2010-04-01";

/// Twilio SMS service configuration
#[derive(Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
    /// API root, overridable for test doubles
    pub api_base_url: String,
}

impl TwilioConfig {
    /// Build from the generic SMS configuration, rejecting missing credentials
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        let required = [
            ("TWILIO_ACCOUNT_SID", &config.account_sid),
            ("TWILIO_AUTH_TOKEN", &config.auth_token),
            ("TWILIO_FROM_NUMBER", &config.from_number),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(InfrastructureError::Config(format!("{} not set", name)));
        }

        if !is_valid_international_phone(&config.from_number) {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            request_timeout_secs: config.request_timeout_secs.max(1),
            api_base_url: TWILIO_API_BASE_URL.to_string(),
        })
    }

    /// Messages resource URL for the account
    pub fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"****")
            .field("from_number", &self.from_number)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: Option<i64>,
    message: String,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);
        if !is_valid_international_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", phone_number),
                ("From", self.config.from_number.as_str()),
                ("Body", message),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(provider = "twilio", phone = %masked_phone, error = %e, "Twilio request failed");
                InfrastructureError::Http(e)
            })?;

        let status = response.status();
        if status.is_success() {
            let body: MessageResponse = response.json().await?;
            info!(
                provider = "twilio",
                phone = %masked_phone,
                message_id = %body.sid,
                "SMS sent successfully"
            );
            return Ok(body.sid);
        }

        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) => match body.code {
                Some(code) => format!("{} (code {})", body.message, code),
                None => body.message,
            },
            Err(_) => "no error details".to_string(),
        };
        error!(
            provider = "twilio",
            phone = %masked_phone,
            status = status.as_u16(),
            detail = %detail,
            "Twilio rejected message"
        );
        Err(InfrastructureError::Sms(format!(
            "Twilio returned {}: {}",
            status.as_u16(),
            detail
        )))
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
