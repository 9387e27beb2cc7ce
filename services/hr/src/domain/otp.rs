//! OTP record state machine.
//!
//! `NONE -> ISSUED -> (VERIFIED | EXPIRED | LOCKED) -> NONE`. Transitions are
//! pure functions over a store slot (`Option<OtpRecord>`) and an explicit
//! `now`; the store applies each one atomically.

use chrono::{DateTime, Utc};

use crate::domain::types::{OtpMetadata, OtpPolicy, OtpRecord, Released};
use crate::error::HrServiceError;

impl OtpRecord {
    pub fn new(
        code: String,
        payload: serde_json::Value,
        metadata: OtpMetadata,
        now: DateTime<Utc>,
        policy: &OtpPolicy,
    ) -> Result<Self, HrServiceError> {
        let expires_at = now
            .checked_add_signed(policy.expiry)
            .ok_or_else(|| anyhow::anyhow!("otp expiry {} out of range", policy.expiry))?;
        Ok(Self {
            code,
            created_at: now,
            expires_at,
            failed_attempts: 0,
            locked_until: None,
            payload,
            metadata,
        })
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Expired and not holding an active lockout: safe to evict.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.is_expired(now) && !self.is_locked(now)
    }
}

/// Whole seconds until `until`, rounded up.
pub fn secs_until(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (until - now).num_milliseconds().max(0);
    (ms + 999) / 1000
}

/// Byte comparison whose running time does not depend on where inputs differ.
fn codes_match(stored: &str, input: &str) -> bool {
    let (a, b) = (stored.as_bytes(), input.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Apply one verification attempt to `slot`.
///
/// Only a match (slot emptied) or a mismatch (counter / lock updated) writes
/// to the slot; not-found, locked and expired outcomes leave it untouched.
pub fn verify_attempt(
    slot: &mut Option<OtpRecord>,
    input: &str,
    now: DateTime<Utc>,
    policy: &OtpPolicy,
) -> Result<Released, HrServiceError> {
    let Some(record) = slot.as_mut() else {
        return Err(HrServiceError::OtpNotFound);
    };

    if let Some(until) = record.locked_until.filter(|until| now < *until) {
        return Err(HrServiceError::OtpLocked {
            retry_after_secs: secs_until(until, now),
        });
    }

    if record.is_expired(now) {
        return Err(HrServiceError::OtpExpired);
    }

    // A lockout that has run out gives the recipient a fresh set of attempts.
    if record.locked_until.take().is_some() {
        record.failed_attempts = 0;
    }

    if codes_match(&record.code, input) {
        return match slot.take() {
            Some(record) => Ok(Released {
                payload: record.payload,
                metadata: record.metadata,
            }),
            None => Err(HrServiceError::Internal(anyhow::anyhow!(
                "otp slot emptied during verification"
            ))),
        };
    }

    let attempts = record.failed_attempts + 1;
    if attempts >= policy.max_attempts {
        let until = now
            .checked_add_signed(policy.lockout)
            .ok_or_else(|| anyhow::anyhow!("otp lockout {} out of range", policy.lockout))?;
        record.failed_attempts = attempts;
        record.locked_until = Some(until);
        return Err(HrServiceError::OtpLocked {
            retry_after_secs: secs_until(until, now),
        });
    }
    record.failed_attempts = attempts;

    Err(HrServiceError::OtpMismatch {
        remaining_attempts: policy.max_attempts - record.failed_attempts,
    })
}

/// Lockout length in whole minutes, rounded up, for display.
pub fn lockout_minutes(retry_after_secs: i64) -> i64 {
    (retry_after_secs.max(0) + 59) / 60
}
