//! Main passcode service implementation

use otc_shared::identity::{is_blank_user_id, mask_user_id, normalize_user_id};
use otc_shared::phone::mask_phone_number;
use std::sync::Arc;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::user::UserDirectory;
use crate::services::otc::{CodeDispatcher, ExpiringStore, OtcService, VerificationOutcome};

use super::types::SendCodeResult;

/// Passcode service for sending and verifying one-time codes by user id
pub struct PasscodeService<D, S, X>
where
    D: UserDirectory + ?Sized,
    S: ExpiringStore + ?Sized,
    X: CodeDispatcher + ?Sized,
{
    /// Resolves user ids to phone numbers
    directory: Arc<D>,
    /// Code lifecycle manager
    otc: OtcService<S>,
    /// Outbound delivery channel
    dispatcher: Arc<X>,
}

impl<D, S, X> PasscodeService<D, S, X>
where
    D: UserDirectory + ?Sized,
    S: ExpiringStore + ?Sized,
    X: CodeDispatcher + ?Sized,
{
    /// Create a new passcode service
    ///
    /// # Arguments
    ///
    /// * `directory` - User directory implementation
    /// * `otc` - Code lifecycle manager
    /// * `dispatcher` - Delivery channel implementation
    pub fn new(directory: Arc<D>, otc: OtcService<S>, dispatcher: Arc<X>) -> Self {
        Self {
            directory,
            otc,
            dispatcher,
        }
    }

    /// Send a fresh code to the phone registered for `user_id`
    ///
    /// This method:
    /// 1. Normalizes the user id to lower case
    /// 2. Resolves the delivery address
    /// 3. Issues and stores a new code, replacing any previous one
    /// 4. Hands the code to the delivery channel
    ///
    /// A delivery failure is reported as [`DomainError::DeliveryFailed`];
    /// the stored code stays valid so a late delivery still verifies.
    pub async fn send_code(&self, user_id: &str) -> DomainResult<SendCodeResult> {
        let user_id = normalized(user_id)?;

        let contact = self.directory.find_contact(&user_id).await?.ok_or_else(|| {
            tracing::info!(
                user = %mask_user_id(&user_id),
                event = "user_not_found",
                "Code requested for unknown user"
            );
            DomainError::UserNotFound
        })?;

        let destination = contact.phone.ok_or_else(|| {
            tracing::info!(
                user = %mask_user_id(&user_id),
                event = "address_not_found",
                "User has no delivery address"
            );
            DomainError::AddressNotFound
        })?;

        let issued = self.otc.issue(&user_id).await?;
        let valid_for_secs = issued.valid_for_secs(self.otc.now());

        let message_id = self
            .dispatcher
            .send_code(&destination, &issued.code, valid_for_secs)
            .await
            .map_err(|e| {
                tracing::error!(
                    user = %mask_user_id(&user_id),
                    phone = %mask_phone_number(&destination),
                    channel = self.dispatcher.channel_name(),
                    error = %e,
                    event = "otc_delivery_failed",
                    "Failed to deliver one-time code"
                );
                DomainError::DeliveryFailed { message: e }
            })?;

        tracing::info!(
            user = %mask_user_id(&user_id),
            phone = %mask_phone_number(&destination),
            channel = self.dispatcher.channel_name(),
            message_id = %message_id,
            event = "otc_dispatched",
            "One-time code dispatched"
        );

        Ok(SendCodeResult {
            user_id,
            destination,
            channel: self.dispatcher.channel_name().to_string(),
            message_id,
            expires_at: issued.expires_at,
        })
    }

    /// Verify a submitted code for `user_id`
    pub async fn verify_code(&self, user_id: &str, code: &str) -> DomainResult<VerificationOutcome> {
        let user_id = normalized(user_id)?;
        self.otc.verify(&user_id, code).await
    }

    /// Name of the configured storage backend
    pub fn store_backend(&self) -> &str {
        self.otc.store().backend_name()
    }

    /// Name of the configured delivery channel
    pub fn channel_name(&self) -> &str {
        self.dispatcher.channel_name()
    }
}

fn normalized(user_id: &str) -> DomainResult<String> {
    if is_blank_user_id(user_id) {
        return Err(DomainError::validation("user_id must not be empty"));
    }
    Ok(normalize_user_id(user_id))
}
