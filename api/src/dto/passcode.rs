use otc_core::SendCodeResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 32))]
    pub passcode: String,
}

// The passcode must not end up in request logs.
impl std::fmt::Debug for VerifyCodeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyCodeRequest")
            .field("user_id", &self.user_id)
            .field("passcode", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    pub user_id: String,
    /// Address the code was sent to
    pub phone: String,
}

impl From<SendCodeResult> for SendCodeResponse {
    fn from(result: SendCodeResult) -> Self {
        Self {
            message: format!("Code sent successfully via {}", result.channel.to_uppercase()),
            user_id: result.user_id,
            phone: result.destination,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

impl VerifyCodeResponse {
    pub fn verified(user_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Code verified successfully".to_string(),
            user_id: user_id.into(),
        }
    }
}
