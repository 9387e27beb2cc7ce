use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::domain::ports::{Clock, OtpStore};
use crate::usecase::otp::OtpGate;

/// Periodically evict OTP records that are expired and not locked.
///
/// Verification checks expiry on its own; this only bounds how long dead
/// records stay resident.
pub fn spawn_sweeper<S, C>(gate: OtpGate<S, C>, every: Duration) -> JoinHandle<()>
where
    S: OtpStore + Clone + 'static,
    C: Clock + Clone + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match gate.sweep() {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "swept stale otp records"),
                Err(e) => tracing::error!(error = %e, "otp sweep failed"),
            }
        }
    })
}
