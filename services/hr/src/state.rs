use axum::extract::FromRef;

use attendo_auth_types::session::SessionKey;

use crate::infra::clock::SystemClock;
use crate::infra::delivery::TracingDelivery;
use crate::infra::memory::InMemoryOtpStore;
use crate::infra::payroll::InMemoryPayrollLedger;
use crate::usecase::otp::OtpGate;

pub type PayrollGate = OtpGate<InMemoryOtpStore, SystemClock>;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub session_key: SessionKey,
    pub cookie_domain: String,
    pub gate: PayrollGate,
    pub ledger: InMemoryPayrollLedger,
}

impl AppState {
    pub fn payroll_source(&self) -> InMemoryPayrollLedger {
        self.ledger.clone()
    }

    pub fn otp_delivery(&self) -> TracingDelivery {
        TracingDelivery
    }
}

impl FromRef<AppState> for SessionKey {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
