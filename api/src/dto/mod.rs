//! Request and response bodies

pub mod error;
pub mod passcode;

pub use error::{ErrorResponse, ErrorResponseExt, VerifyErrorResponse};
pub use passcode::{SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
