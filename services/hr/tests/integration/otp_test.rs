use chrono::Duration;
use serde_json::json;

use attendo_hr::domain::ports::OtpStore;
use attendo_hr::domain::types::{OtpMetadata, OtpPolicy};
use attendo_hr::infra::memory::InMemoryOtpStore;
use attendo_hr::usecase::otp::OtpGate;
use attendo_hr::error::HrServiceError;

use crate::helpers::{ManualClock, force_code, manual_gate};

fn march() -> OtpMetadata {
    OtpMetadata {
        month: "2024-03".into(),
        department: None,
    }
}

#[test]
fn should_walk_mismatch_to_lockout_scenario() {
    let (gate, _clock) = manual_gate();
    gate.issue("U1", json!({ "month": "march" }), march()).unwrap();
    force_code(&gate.store, "U1", "123456");

    let r = gate.verify("U1", "000000");
    assert!(
        matches!(r, Err(HrServiceError::OtpMismatch { remaining_attempts: 2 })),
        "got {r:?}"
    );
    let r = gate.verify("U1", "111111");
    assert!(
        matches!(r, Err(HrServiceError::OtpMismatch { remaining_attempts: 1 })),
        "got {r:?}"
    );
    let r = gate.verify("U1", "222222");
    assert!(
        matches!(r, Err(HrServiceError::OtpLocked { retry_after_secs: 1800 })),
        "got {r:?}"
    );
    let r = gate.verify("U1", "123456");
    assert!(matches!(r, Err(HrServiceError::OtpLocked { .. })), "got {r:?}");
}

#[test]
fn should_expire_after_window_even_with_correct_code() {
    let (gate, clock) = manual_gate();
    let issued = gate.issue("U1", json!({}), march()).unwrap();

    clock.advance(Duration::minutes(10) + Duration::seconds(1));
    let r = gate.verify("U1", &issued.code);
    assert!(matches!(r, Err(HrServiceError::OtpExpired)), "got {r:?}");
}

#[test]
fn should_release_payload_exactly_once() {
    let (gate, _clock) = manual_gate();
    let issued = gate
        .issue("U1", json!({ "month": "march" }), march())
        .unwrap();

    let released = gate.verify("U1", &issued.code).unwrap();
    assert_eq!(released.payload, json!({ "month": "march" }));
    assert_eq!(released.metadata, march());

    let again = gate.verify("U1", &issued.code);
    assert!(matches!(again, Err(HrServiceError::OtpNotFound)), "got {again:?}");
}

#[test]
fn should_only_accept_newest_code_after_reissue() {
    let (gate, _clock) = manual_gate();
    gate.issue("U1", json!({ "v": 1 }), march()).unwrap();
    force_code(&gate.store, "U1", "111111");
    gate.issue("U1", json!({ "v": 2 }), march()).unwrap();
    force_code(&gate.store, "U1", "222222");

    let r = gate.verify("U1", "111111");
    assert!(matches!(r, Err(HrServiceError::OtpMismatch { .. })), "got {r:?}");
    let released = gate.verify("U1", "222222").unwrap();
    assert_eq!(released.payload, json!({ "v": 2 }));
}

#[test]
fn should_reset_lockout_on_reissue() {
    let (gate, _clock) = manual_gate();
    gate.issue("U1", json!({}), march()).unwrap();
    for _ in 0..3 {
        let _ = gate.verify("U1", "not-it");
    }
    let fresh = gate.issue("U1", json!({}), march()).unwrap();
    assert!(gate.verify("U1", &fresh.code).is_ok());
}

#[test]
fn should_keep_recipients_independent() {
    let (gate, _clock) = manual_gate();
    gate.issue("A", json!("a"), march()).unwrap();
    gate.issue("B", json!("b"), march()).unwrap();
    force_code(&gate.store, "A", "111111");
    force_code(&gate.store, "B", "222222");

    let r = gate.verify("A", "222222");
    assert!(
        matches!(r, Err(HrServiceError::OtpMismatch { remaining_attempts: 2 })),
        "got {r:?}"
    );
    assert_eq!(gate.verify("B", "222222").unwrap().payload, json!("b"));
    assert_eq!(gate.verify("A", "111111").unwrap().payload, json!("a"));
    assert!(gate.store.is_empty().unwrap());
}

#[test]
fn should_report_not_found_without_creating_state() {
    let (gate, _clock) = manual_gate();
    let r = gate.verify("nobody", "123456");
    assert!(matches!(r, Err(HrServiceError::OtpNotFound)), "got {r:?}");
    assert!(gate.store.is_empty().unwrap());
}

#[test]
fn should_clear_explicitly() {
    let (gate, _clock) = manual_gate();
    let issued = gate.issue("U1", json!({}), march()).unwrap();
    assert!(gate.clear("U1").unwrap());
    assert!(!gate.clear("U1").unwrap());
    let r = gate.verify("U1", &issued.code);
    assert!(matches!(r, Err(HrServiceError::OtpNotFound)), "got {r:?}");
}

#[test]
fn should_sweep_stale_records_but_keep_active_lockouts() {
    let (gate, clock) = manual_gate();
    gate.issue("expired", json!({}), march()).unwrap();
    gate.issue("locked", json!({}), march()).unwrap();
    for _ in 0..3 {
        let _ = gate.verify("locked", "not-it");
    }

    clock.advance(Duration::minutes(11));
    gate.issue("live", json!({}), march()).unwrap();

    assert_eq!(gate.sweep().unwrap(), 1);
    assert_eq!(gate.store.len().unwrap(), 2);

    // Lockout ends 30 minutes after the third failure.
    clock.advance(Duration::minutes(20));
    assert_eq!(gate.sweep().unwrap(), 2);
    assert!(gate.store.is_empty().unwrap());
}

#[tokio::test(start_paused = true)]
async fn sweeper_task_evicts_on_interval() {
    let (gate, clock) = manual_gate();
    gate.issue("U1", json!({}), march()).unwrap();
    clock.advance(Duration::minutes(11));

    let handle =
        attendo_hr::infra::sweeper::spawn_sweeper(gate.clone(), std::time::Duration::from_secs(60));
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;

    assert!(gate.store.is_empty().unwrap());
    handle.abort();
}

#[test]
fn should_refuse_issue_when_expiry_overflows_the_clock() {
    let policy = OtpPolicy {
        expiry: Duration::seconds(100_000_000_000_000),
        ..OtpPolicy::default()
    };
    let gate = OtpGate::new(InMemoryOtpStore::new(), ManualClock::new(), policy);

    let r = gate.issue("U1", json!({}), march());
    assert!(matches!(r, Err(HrServiceError::Internal(_))), "got {r:?}");
    assert!(gate.store.is_empty().unwrap());
}
