use rand::RngExt;

use crate::domain::otp::verify_attempt;
use crate::domain::ports::{Clock, OtpStore};
use crate::domain::types::{IssuedOtp, OtpMetadata, OtpPolicy, OtpRecord, Released};
use crate::error::HrServiceError;

const DIGITS: &[u8] = b"0123456789";

/// Numeric code of `len` digits from the thread-local CSPRNG.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}

/// One-time-code gate over an injected store and clock.
///
/// Binds an opaque payload to a recipient key and releases it once to whoever
/// presents the matching code before expiry and lockout.
#[derive(Clone)]
pub struct OtpGate<S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub store: S,
    pub clock: C,
    pub policy: OtpPolicy,
}

impl<S, C> OtpGate<S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, policy: OtpPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Issue a fresh code for `recipient`, replacing any live record.
    ///
    /// The caller delivers the returned code out of band.
    pub fn issue(
        &self,
        recipient: &str,
        payload: serde_json::Value,
        metadata: OtpMetadata,
    ) -> Result<IssuedOtp, HrServiceError> {
        let now = self.clock.now();
        let code = generate_code(self.policy.code_length);
        let record = OtpRecord::new(code.clone(), payload, metadata.clone(), now, &self.policy)?;
        let expires_at = record.expires_at;
        self.store.put(recipient, record)?;
        tracing::info!(recipient, %expires_at, "otp issued");
        Ok(IssuedOtp {
            code,
            expires_at,
            metadata,
        })
    }

    pub fn verify(&self, recipient: &str, code: &str) -> Result<Released, HrServiceError> {
        let now = self.clock.now();
        let outcome = self
            .store
            .update(recipient, |slot| verify_attempt(slot, code, now, &self.policy))?;
        match &outcome {
            Ok(_) => tracing::info!(recipient, "otp verified"),
            Err(HrServiceError::OtpMismatch { remaining_attempts }) => {
                tracing::info!(recipient, remaining_attempts, "otp mismatch")
            }
            Err(HrServiceError::OtpLocked { retry_after_secs }) => {
                tracing::warn!(recipient, retry_after_secs, "otp locked")
            }
            Err(e) => tracing::debug!(recipient, kind = e.kind(), "otp rejected"),
        }
        outcome
    }

    /// Drop `recipient`'s record. Returns whether one existed.
    pub fn clear(&self, recipient: &str) -> Result<bool, HrServiceError> {
        let existed = self.store.remove(recipient)?.is_some();
        if existed {
            tracing::info!(recipient, "otp cleared");
        }
        Ok(existed)
    }

    /// Evict expired records that are not serving an active lockout.
    pub fn sweep(&self) -> Result<usize, HrServiceError> {
        let now = self.clock.now();
        self.store.evict(|record| record.is_stale(now))
    }
}
