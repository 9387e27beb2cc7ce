use std::time::Duration;

use tracing::info;

use attendo_auth_types::session::SessionKey;
use attendo_core::config::Config;
use attendo_core::tracing::init_tracing;

use attendo_hr::config::HrConfig;
use attendo_hr::infra::clock::SystemClock;
use attendo_hr::infra::memory::InMemoryOtpStore;
use attendo_hr::infra::payroll::InMemoryPayrollLedger;
use attendo_hr::infra::sweeper::spawn_sweeper;
use attendo_hr::router::build_router;
use attendo_hr::state::AppState;
use attendo_hr::usecase::otp::OtpGate;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = HrConfig::from_env();
    let policy = config.otp_policy().expect("invalid OTP policy");

    let state = AppState {
        session_key: SessionKey::new(config.jwt_secret.as_str()),
        cookie_domain: config.cookie_domain.clone(),
        gate: OtpGate::new(InMemoryOtpStore::new(), SystemClock, policy),
        ledger: InMemoryPayrollLedger::sample(),
    };

    if config.otp_sweep_interval_secs > 0 {
        spawn_sweeper(
            state.gate.clone(),
            Duration::from_secs(config.otp_sweep_interval_secs),
        );
    }

    info!(
        code_length = policy.code_length,
        expiry_secs = policy.expiry.num_seconds(),
        max_attempts = policy.max_attempts,
        lockout_secs = policy.lockout.num_seconds(),
        "otp policy loaded"
    );

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.hr_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("hr service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
