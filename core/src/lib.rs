//! # OTC Core
//!
//! Core domain layer for the one-time code service.
//! This crate contains the code record entity, the code generator, the
//! lifecycle manager that issues and verifies codes, the passcode service
//! that ties it to the user directory and delivery, and the traits the
//! infrastructure layer implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
