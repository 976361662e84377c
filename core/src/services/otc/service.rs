//! Code lifecycle manager: issue, verify and consume one-time codes

use chrono::{DateTime, Utc};
use otc_shared::identity::{is_blank_user_id, mask_user_id, normalize_user_id};
use std::sync::Arc;

use crate::domain::entities::otc_record::OtcRecord;
use crate::errors::{DomainError, DomainResult};

use super::config::{OtcServiceConfig, MAX_COMMIT_ROUNDS, STORE_EXPIRY_GRACE_SECONDS};
use super::generator::{CodeGenerator, OsRngCodeGenerator};
use super::traits::{Clock, ExpiringStore, Replacement, SystemClock};
use super::types::{IssuedCode, VerificationOutcome};

/// Issues codes and verifies submissions against the stored record
///
/// All record mutations go through this type. Verification commits every
/// state change with [`ExpiringStore::replace_if_unchanged`], so concurrent
/// verifies for one user serialize on the stored value: attempts never
/// decrease and a record is consumed by exactly one caller.
pub struct OtcService<S: ExpiringStore + ?Sized> {
    store: Arc<S>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    config: OtcServiceConfig,
}

impl<S: ExpiringStore + ?Sized> OtcService<S> {
    /// Create a manager over `store` using the OS random source and wall clock
    pub fn new(store: Arc<S>, config: OtcServiceConfig) -> Self {
        Self {
            store,
            generator: Arc::new(OsRngCodeGenerator),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtcServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Issue a fresh code for `user_id`, replacing any live record
    ///
    /// The returned code must only be passed on to delivery.
    pub async fn issue(&self, user_id: &str) -> DomainResult<IssuedCode> {
        let user_id = checked_user_id(user_id)?;
        let code = self.generator.generate(self.config.code_length)?;
        let record =
            OtcRecord::issued_at(&user_id, code, self.clock.now(), self.config.ttl_seconds)?;

        let key = OtcRecord::store_key(&user_id);
        let value = encode(&record)?;

        self.store
            .put(&key, &value, self.config.store_ttl_seconds())
            .await
            .map_err(|e| {
                tracing::error!(
                    user = %mask_user_id(&user_id),
                    error = %e,
                    event = "otc_storage_failed",
                    "Failed to store one-time code"
                );
                e
            })?;

        tracing::info!(
            user = %mask_user_id(&user_id),
            expires_at = %record.expires_at,
            event = "otc_issued",
            "Issued one-time code"
        );

        Ok(IssuedCode {
            user_id,
            code: record.code,
            expires_at: record.expires_at,
        })
    }

    /// Check `submitted` against the live record for `user_id`
    pub async fn verify(&self, user_id: &str, submitted: &str) -> DomainResult<VerificationOutcome> {
        let user_id = checked_user_id(user_id)?;
        let key = OtcRecord::store_key(&user_id);

        for round in 0..MAX_COMMIT_ROUNDS {
            let Some(raw) = self.store.get(&key).await? else {
                tracing::info!(
                    user = %mask_user_id(&user_id),
                    event = "otc_not_found",
                    "No one-time code on record"
                );
                return Ok(VerificationOutcome::NotFound);
            };

            let record = OtcRecord::from_json(&raw).map_err(|e| {
                tracing::error!(
                    user = %mask_user_id(&user_id),
                    error = %e,
                    event = "otc_record_corrupt",
                    "Stored one-time code record is unreadable"
                );
                DomainError::Internal {
                    message: format!("Unreadable code record: {}", e),
                }
            })?;

            let now = self.clock.now();
            let (replacement, outcome) = self.decide(&key, &record, submitted, now).await?;

            if self.store.replace_if_unchanged(&key, &raw, replacement).await? {
                log_outcome(&user_id, &record, outcome);
                return Ok(outcome);
            }

            tracing::debug!(
                user = %mask_user_id(&user_id),
                round = round,
                event = "otc_commit_conflict",
                "Record changed during verification, retrying"
            );
        }

        tracing::warn!(
            user = %mask_user_id(&user_id),
            event = "otc_commit_contention",
            "Gave up verifying after repeated conflicting updates"
        );
        Err(DomainError::storage(
            "Code record kept changing during verification",
        ))
    }

    async fn decide(
        &self,
        key: &str,
        record: &OtcRecord,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<(Replacement, VerificationOutcome)> {
        let max_attempts = self.config.max_attempts;

        if record.is_expired_at(now) {
            return Ok((Replacement::Delete, VerificationOutcome::Expired));
        }
        // Exhaustion wins over a correct code
        if record.is_exhausted(max_attempts) {
            return Ok((Replacement::Delete, VerificationOutcome::Exhausted));
        }
        if record.matches(submitted) {
            return Ok((Replacement::Delete, VerificationOutcome::Verified));
        }

        let updated = record.with_failed_attempt();
        let ttl_seconds = match self.store.remaining_ttl(key).await? {
            Some(ttl) => ttl,
            None => record
                .seconds_until_expiry(now)
                .saturating_add(STORE_EXPIRY_GRACE_SECONDS),
        }
        .max(1);

        Ok((
            Replacement::Update {
                value: encode(&updated)?,
                ttl_seconds,
            },
            VerificationOutcome::InvalidCode {
                remaining_attempts: updated.remaining_attempts(max_attempts),
            },
        ))
    }
}

fn checked_user_id(user_id: &str) -> DomainResult<String> {
    if is_blank_user_id(user_id) {
        return Err(DomainError::validation("user_id must not be empty"));
    }
    Ok(normalize_user_id(user_id))
}

fn encode(record: &OtcRecord) -> DomainResult<String> {
    record.to_json().map_err(|e| DomainError::Internal {
        message: format!("Failed to encode code record: {}", e),
    })
}

fn log_outcome(user_id: &str, record: &OtcRecord, outcome: VerificationOutcome) {
    let user = mask_user_id(user_id);
    match outcome {
        VerificationOutcome::Verified => {
            tracing::info!(user = %user, event = "otc_verified", "One-time code verified")
        }
        VerificationOutcome::Expired => tracing::info!(
            user = %user,
            expired_at = %record.expires_at,
            event = "otc_expired",
            "One-time code expired"
        ),
        VerificationOutcome::Exhausted => tracing::warn!(
            user = %user,
            attempts = record.attempts,
            event = "otc_exhausted",
            "One-time code attempts exhausted"
        ),
        VerificationOutcome::InvalidCode { remaining_attempts } => tracing::warn!(
            user = %user,
            remaining_attempts = remaining_attempts,
            event = "otc_invalid_code",
            "Invalid one-time code submitted"
        ),
        VerificationOutcome::NotFound => {}
    }
}
