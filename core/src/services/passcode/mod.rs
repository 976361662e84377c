//! Passcode service tying the user directory, code lifecycle and delivery together

mod service;
mod types;


pub use service::PasscodeService;
pub use types::SendCodeResult;
