//! One-time code lifecycle module
//!
//! This module provides the core code workflow:
//! - Code generation from the OS random source
//! - Time-bounded storage behind the [`ExpiringStore`] trait
//! - Attempt-limited verification with single-use consumption

mod config;
mod generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::{OtcServiceConfig, MAX_COMMIT_ROUNDS, STORE_EXPIRY_GRACE_SECONDS};
pub use generator::{generate_code, CodeGenerator, OsRngCodeGenerator};
pub use service::OtcService;
pub use traits::{Clock, CodeDispatcher, ExpiringStore, Replacement, SystemClock};
pub use types::{IssuedCode, VerificationOutcome};
