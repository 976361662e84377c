//! Unit tests for SMS provider selection

use crate::config::SmsConfig;
use crate::sms::{create_sms_service, SmsService};
use crate::InfrastructureError;

#[test]
fn test_mock_provider() {
    let service = create_sms_service(&SmsConfig::mock()).unwrap();
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_unknown_provider_rejected() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..SmsConfig::default()
    };

    assert!(matches!(
        create_sms_service(&config),
        Err(InfrastructureError::Config(_))
    ));
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_twilio_without_credentials_rejected() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        ..SmsConfig::default()
    };

    match create_sms_service(&config) {
        Err(InfrastructureError::Config(msg)) => assert!(msg.contains("TWILIO_ACCOUNT_SID")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected a configuration error"),
    }
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_twilio_with_credentials() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "AC00000000000000000000000000000000".to_string(),
        auth_token: "token".to_string(),
        from_number: "+15005550006".to_string(),
        ..SmsConfig::default()
    };

    let service = create_sms_service(&config).unwrap();
    assert_eq!(service.provider_name(), "Twilio");
}
