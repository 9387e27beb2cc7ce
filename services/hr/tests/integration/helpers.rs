use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use attendo_auth_types::session::SessionKey;
use attendo_hr::domain::ports::{Clock, OtpDelivery, OtpStore};
use attendo_hr::domain::types::{Compensation, OtpMetadata, OtpPolicy};
use attendo_hr::error::HrServiceError;
use attendo_hr::infra::clock::SystemClock;
use attendo_hr::infra::memory::InMemoryOtpStore;
use attendo_hr::infra::payroll::InMemoryPayrollLedger;
use attendo_hr::state::AppState;
use attendo_hr::usecase::otp::OtpGate;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

// ── ManualClock ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ── RecordingDelivery ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Delivered {
    pub recipient: String,
    pub code: String,
    pub metadata: OtpMetadata,
}

#[derive(Clone, Default)]
pub struct RecordingDelivery {
    pub sent: Arc<Mutex<Vec<Delivered>>>,
    pub fail: bool,
}

impl RecordingDelivery {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|d| d.code.clone())
    }
}

impl OtpDelivery for RecordingDelivery {
    async fn deliver(
        &self,
        recipient: &str,
        code: &str,
        metadata: &OtpMetadata,
    ) -> Result<(), HrServiceError> {
        if self.fail {
            return Err(HrServiceError::Internal(anyhow::anyhow!("smtp unreachable")));
        }
        self.sent.lock().unwrap().push(Delivered {
            recipient: recipient.to_owned(),
            code: code.to_owned(),
            metadata: metadata.clone(),
        });
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn manual_gate() -> (OtpGate<InMemoryOtpStore, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let gate = OtpGate::new(InMemoryOtpStore::new(), clock.clone(), OtpPolicy::default());
    (gate, clock)
}

/// Overwrite the live code for `key` so scenarios can use known values.
pub fn force_code<S: OtpStore>(store: &S, key: &str, code: &str) {
    store
        .update(key, |slot| {
            slot.as_mut().expect("record issued").code = code.to_owned();
        })
        .unwrap();
}

pub fn test_ledger() -> InMemoryPayrollLedger {
    InMemoryPayrollLedger::new(vec![
        Compensation {
            employee_id: "EMP-100".into(),
            name: "Test One".into(),
            department: "engineering".into(),
            base_salary: 500_000,
            allowances: 10_000,
            deductions: 100_000,
        },
        Compensation {
            employee_id: "EMP-200".into(),
            name: "Test Two".into(),
            department: "hr".into(),
            base_salary: 400_000,
            allowances: 0,
            deductions: 80_000,
        },
    ])
}

pub fn test_state() -> AppState {
    AppState {
        session_key: SessionKey::new(TEST_JWT_SECRET),
        cookie_domain: "example.com".to_owned(),
        gate: OtpGate::new(InMemoryOtpStore::new(), SystemClock, OtpPolicy::default()),
        ledger: test_ledger(),
    }
}

/// Live code for `key` read straight from the service's store.
pub fn stored_code(state: &AppState, key: &str) -> Option<String> {
    state
        .gate
        .store
        .update(key, |slot| slot.as_ref().map(|r| r.code.clone()))
        .unwrap()
}
