//! Translation of verification outcomes and domain errors into HTTP responses

pub mod error;

pub use error::{
    domain_error_status, handle_domain_error, handle_validation_errors, outcome_status,
    verify_error_response, verify_outcome_response,
};
