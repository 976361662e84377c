//! Domain layer containing the one-time code entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
