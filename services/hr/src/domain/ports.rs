#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{OtpMetadata, OtpRecord, PayrollSummary};
use crate::error::HrServiceError;

/// Source of "now". Injected so expiry and lockout are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Storage for live OTP records, one per recipient key.
///
/// Each call is atomic with respect to every other call on the same key: a
/// closure passed to [`OtpStore::update`] observes and writes the slot with no
/// interleaving. Implementations choose the locking granularity. Errors mean
/// the store itself is unusable (e.g. a poisoned lock).
pub trait OtpStore: Send + Sync {
    /// Replace whatever record `key` holds.
    fn put(&self, key: &str, record: OtpRecord) -> Result<(), HrServiceError>;

    /// Run `f` on `key`'s slot. Whatever `f` leaves in the slot is kept.
    fn update<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Option<OtpRecord>) -> R,
    ) -> Result<R, HrServiceError>;

    fn remove(&self, key: &str) -> Result<Option<OtpRecord>, HrServiceError>;

    /// Drop every record for which `evict` returns true. Returns how many went.
    fn evict(&self, evict: impl FnMut(&OtpRecord) -> bool) -> Result<usize, HrServiceError>;

    fn len(&self) -> Result<usize, HrServiceError>;

    fn is_empty(&self) -> Result<bool, HrServiceError> {
        Ok(self.len()? == 0)
    }
}

/// Producer of the payroll payload bound to an OTP.
pub trait PayrollSource: Send + Sync {
    /// `None` when the department is unknown.
    async fn summarize(
        &self,
        month: &str,
        department: Option<&str>,
    ) -> Result<Option<PayrollSummary>, HrServiceError>;
}

/// Out-of-band channel that carries a freshly issued code to its recipient.
pub trait OtpDelivery: Send + Sync {
    async fn deliver(
        &self,
        recipient: &str,
        code: &str,
        metadata: &OtpMetadata,
    ) -> Result<(), HrServiceError>;
}
