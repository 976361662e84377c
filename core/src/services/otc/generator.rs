//! Numeric code generation from the operating system CSPRNG

use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::{DomainError, DomainResult};

// Largest multiple of 10 that fits in a byte; bytes at or above it are
// rejected so every digit is equally likely.
const UNBIASED_BYTE_LIMIT: u8 = 250;

/// Source of fresh codes
pub trait CodeGenerator: Send + Sync {
    /// Produce `length` decimal digits
    fn generate(&self, length: usize) -> DomainResult<String>;
}

/// Generator drawing from [`OsRng`]; never falls back to a weaker source
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngCodeGenerator;

impl CodeGenerator for OsRngCodeGenerator {
    fn generate(&self, length: usize) -> DomainResult<String> {
        generate_code(length)
    }
}

/// Generate a numeric code of exactly `length` ASCII digits
pub fn generate_code(length: usize) -> DomainResult<String> {
    if length == 0 {
        return Err(DomainError::validation("Code length must be at least 1"));
    }

    let mut code = String::with_capacity(length);
    let mut buf = [0u8; 16];

    while code.len() < length {
        OsRng.try_fill_bytes(&mut buf).map_err(|e| {
            tracing::error!(error = %e, event = "entropy_unavailable", "OS random source failed");
            DomainError::EntropyUnavailable {
                message: e.to_string(),
            }
        })?;

        for byte in buf.iter().copied().filter(|b| *b < UNBIASED_BYTE_LIMIT) {
            if code.len() == length {
                break;
            }
            code.push(char::from(b'0' + byte % 10));
        }
    }

    Ok(code)
}
