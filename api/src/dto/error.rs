use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

pub use otc_shared::ErrorResponse;

// Extension trait for ErrorResponse to add actix-web specific methods
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(status).json(self)
    }
}

/// Body of every unsuccessful `/verify-code` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyErrorResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
}

impl VerifyErrorResponse {
    pub fn new(user_id: impl Into<String>, error_type: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            user_id: user_id.into(),
            error_type: error_type.to_string(),
            remaining_attempts: None,
        }
    }

    pub fn with_remaining_attempts(mut self, remaining: u32) -> Self {
        self.remaining_attempts = Some(remaining);
        self
    }
}
