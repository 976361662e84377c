use actix_web::{http::StatusCode, HttpResponse};
use otc_core::{DomainError, VerificationOutcome};
use otc_shared::error_codes;
use validator::ValidationErrors;

use crate::dto::{ErrorResponse, ErrorResponseExt, VerifyCodeResponse, VerifyErrorResponse};

/// HTTP status for a verification outcome
pub fn outcome_status(outcome: &VerificationOutcome) -> StatusCode {
    match outcome {
        VerificationOutcome::Verified => StatusCode::OK,
        VerificationOutcome::NotFound => StatusCode::NOT_FOUND,
        VerificationOutcome::Expired => StatusCode::GONE,
        VerificationOutcome::Exhausted => StatusCode::TOO_MANY_REQUESTS,
        VerificationOutcome::InvalidCode { .. } => StatusCode::BAD_REQUEST,
    }
}

/// HTTP status for a domain error
pub fn domain_error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::UserNotFound | DomainError::AddressNotFound => StatusCode::NOT_FOUND,
        DomainError::DeliveryFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::StorageUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::EntropyUnavailable { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
    }
}

fn outcome_message(outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Verified => "Code verified successfully".to_string(),
        VerificationOutcome::NotFound => {
            "No code found for this user or code has expired".to_string()
        }
        VerificationOutcome::Expired => "Code has expired".to_string(),
        VerificationOutcome::Exhausted => "Too many failed attempts".to_string(),
        VerificationOutcome::InvalidCode { remaining_attempts } => {
            format!("Invalid code. {} attempts remaining", remaining_attempts)
        }
    }
}

// Infrastructure details stay in the logs; clients get a generic message.
fn public_message(error: &DomainError) -> String {
    match error {
        DomainError::UserNotFound => "User not found".to_string(),
        DomainError::AddressNotFound => "Phone number not found for user".to_string(),
        DomainError::DeliveryFailed { .. } => "Failed to send code".to_string(),
        DomainError::StorageUnavailable { .. } => {
            "Code storage is temporarily unavailable. Please try again later".to_string()
        }
        DomainError::EntropyUnavailable { .. } | DomainError::Internal { .. } => {
            "An internal error occurred".to_string()
        }
        DomainError::Validation { message } => message.clone(),
    }
}

fn log_domain_error(error: &DomainError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(
            error = %error,
            error_code = error.error_code(),
            status = status.as_u16(),
            "Request failed"
        );
    } else {
        tracing::info!(
            error_code = error.error_code(),
            status = status.as_u16(),
            "Request rejected"
        );
    }
}

/// Response for a send-code or generic failure
pub fn handle_domain_error(error: &DomainError, user_id: &str) -> HttpResponse {
    let status = domain_error_status(error);
    log_domain_error(error, status);

    ErrorResponse::new(error.error_code(), public_message(error))
        .add_detail("user_id", user_id)
        .to_response(status)
}

/// Response for a finished verification
pub fn verify_outcome_response(outcome: VerificationOutcome, user_id: &str) -> HttpResponse {
    let status = outcome_status(&outcome);
    let error_type = match outcome {
        VerificationOutcome::Verified => {
            return HttpResponse::build(status).json(VerifyCodeResponse::verified(user_id));
        }
        VerificationOutcome::NotFound => error_codes::NOT_FOUND,
        VerificationOutcome::Expired => error_codes::EXPIRED,
        VerificationOutcome::Exhausted => error_codes::TOO_MANY_ATTEMPTS,
        VerificationOutcome::InvalidCode { .. } => error_codes::INVALID_CODE,
    };

    let mut body = VerifyErrorResponse::new(user_id, error_type, outcome_message(&outcome));
    if let Some(remaining) = outcome.remaining_attempts() {
        body = body.with_remaining_attempts(remaining);
    }
    HttpResponse::build(status).json(body)
}

/// Response for a verification that failed with a domain error
pub fn verify_error_response(error: &DomainError, user_id: &str) -> HttpResponse {
    let status = domain_error_status(error);
    log_domain_error(error, status);

    HttpResponse::build(status).json(VerifyErrorResponse::new(
        user_id,
        error.error_code(),
        public_message(error),
    ))
}

/// Field errors from request validation as a 400 body
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();

    tracing::info!(fields = ?fields, "Request validation failed");

    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
        .add_detail("fields", &fields)
        .to_response(StatusCode::BAD_REQUEST)
}
