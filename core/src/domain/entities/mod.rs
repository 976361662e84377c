//! Domain entities representing core business objects.

pub mod otc_record;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use otc_record::{OtcRecord, OTC_KEY_NAMESPACE};
