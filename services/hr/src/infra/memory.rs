use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::OtpStore;
use crate::domain::types::OtpRecord;
use crate::error::HrServiceError;

/// Process-local OTP store. Clones share the same map.
///
/// A single mutex serialises all keys; no operation awaits while holding it.
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<Mutex<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, OtpRecord>>, HrServiceError> {
        self.records
            .lock()
            .map_err(|_| HrServiceError::Internal(anyhow::anyhow!("otp store lock poisoned")))
    }
}

impl OtpStore for InMemoryOtpStore {
    fn put(&self, key: &str, record: OtpRecord) -> Result<(), HrServiceError> {
        self.lock()?.insert(key.to_owned(), record);
        Ok(())
    }

    fn update<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut Option<OtpRecord>) -> R,
    ) -> Result<R, HrServiceError> {
        let mut records = self.lock()?;
        let mut slot = records.remove(key);
        let out = f(&mut slot);
        if let Some(record) = slot {
            records.insert(key.to_owned(), record);
        }
        Ok(out)
    }

    fn remove(&self, key: &str) -> Result<Option<OtpRecord>, HrServiceError> {
        Ok(self.lock()?.remove(key))
    }

    fn evict(&self, mut evict: impl FnMut(&OtpRecord) -> bool) -> Result<usize, HrServiceError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|_, record| !evict(record));
        Ok(before - records.len())
    }

    fn len(&self) -> Result<usize, HrServiceError> {
        Ok(self.lock()?.len())
    }
}
