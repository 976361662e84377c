//! Unit tests for SMS module

mod create_service_tests;
mod sms_service_tests;
