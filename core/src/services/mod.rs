//! Business services containing domain logic and use cases.

pub mod otc;
pub mod passcode;

// Re-export commonly used types
pub use otc::{
    generate_code, Clock, CodeDispatcher, CodeGenerator, ExpiringStore, IssuedCode,
    OsRngCodeGenerator, OtcService, OtcServiceConfig, Replacement, SystemClock,
    VerificationOutcome, MAX_COMMIT_ROUNDS, STORE_EXPIRY_GRACE_SECONDS,
};
pub use passcode::{PasscodeService, SendCodeResult};
