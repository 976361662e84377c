//! Unit tests for the SMS trait helpers

use crate::sms::verification_message;

#[test]
fn test_verification_message_text() {
    assert_eq!(
        verification_message("123456", 300),
        "Your verification code is: 123456. This code expires in 5 minutes."
    );
}

#[test]
fn test_verification_message_rounds_up() {
    assert!(verification_message("123456", 61).contains("expires in 2 minutes"));
    assert!(verification_message("123456", 1).contains("expires in 1 minute."));
    assert!(verification_message("123456", 0).contains("expires in 1 minute."));
}
