//! Adapter exposing an SMS provider as the core's code dispatcher

use async_trait::async_trait;
use otc_core::CodeDispatcher;
use std::sync::Arc;

use super::sms_service::SmsService;

/// Delivers one-time codes by SMS
pub struct SmsCodeDispatcher<S: SmsService + ?Sized> {
    sms: Arc<S>,
}

impl<S: SmsService + ?Sized> SmsCodeDispatcher<S> {
    pub fn new(sms: Arc<S>) -> Self {
        Self { sms }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.sms.provider_name()
    }
}

#[async_trait]
impl<S: SmsService + ?Sized> CodeDispatcher for SmsCodeDispatcher<S> {
    async fn send_code(
        &self,
        destination: &str,
        code: &str,
        valid_for_secs: u64,
    ) -> Result<String, String> {
        self.sms
            .send_verification_code(destination, code, valid_for_secs)
            .await
            .map_err(|e| e.to_string())
    }

    fn channel_name(&self) -> &str {
        "sms"
    }
}
