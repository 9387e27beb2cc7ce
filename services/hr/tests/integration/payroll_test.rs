use attendo_hr::domain::ports::OtpStore;
use attendo_hr::error::HrServiceError;
use attendo_hr::usecase::payroll::{
    RequestPayrollAccessInput, RequestPayrollAccessUseCase, UnlockPayrollUseCase,
};

use crate::helpers::{RecordingDelivery, manual_gate, test_ledger};

fn input(month: &str, department: Option<&str>) -> RequestPayrollAccessInput {
    RequestPayrollAccessInput {
        recipient: "hr-officer".to_owned(),
        month: month.to_owned(),
        department: department.map(str::to_owned),
    }
}

#[tokio::test]
async fn should_deliver_code_and_unlock_summary() {
    let (gate, _clock) = manual_gate();
    let delivery = RecordingDelivery::default();
    let usecase = RequestPayrollAccessUseCase {
        gate: &gate,
        payroll: test_ledger(),
        delivery: delivery.clone(),
    };

    let out = usecase
        .execute(input("2024-03", Some("Engineering")))
        .await
        .unwrap();
    assert_eq!(out.metadata.month, "2024-03");
    assert_eq!(out.metadata.department.as_deref(), Some("engineering"));

    let sent = delivery.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "hr-officer");
    assert_eq!(sent[0].code, out.code);
    assert_eq!(sent[0].metadata, out.metadata);

    let unlocked = UnlockPayrollUseCase { gate: &gate }
        .execute("hr-officer", &out.code)
        .unwrap();
    assert_eq!(unlocked.payroll.month, "2024-03");
    assert_eq!(unlocked.payroll.headcount, 1);
    assert_eq!(unlocked.payroll.total_gross, 510_000);
    assert_eq!(unlocked.payroll.total_deductions, 100_000);
    assert_eq!(unlocked.payroll.total_net, 410_000);
    assert_eq!(unlocked.metadata, out.metadata);
}

#[tokio::test]
async fn should_summarize_all_departments_without_filter() {
    let (gate, _clock) = manual_gate();
    let delivery = RecordingDelivery::default();
    let usecase = RequestPayrollAccessUseCase {
        gate: &gate,
        payroll: test_ledger(),
        delivery: delivery.clone(),
    };

    usecase.execute(input("2024-04", None)).await.unwrap();
    let code = delivery.last_code().unwrap();
    let unlocked = UnlockPayrollUseCase { gate: &gate }
        .execute("hr-officer", &code)
        .unwrap();
    assert_eq!(unlocked.payroll.headcount, 2);
    assert_eq!(unlocked.payroll.department, None);
}

#[tokio::test]
async fn should_reject_malformed_month_without_issuing() {
    let (gate, _clock) = manual_gate();
    let usecase = RequestPayrollAccessUseCase {
        gate: &gate,
        payroll: test_ledger(),
        delivery: RecordingDelivery::default(),
    };

    for month in ["2024-13", "March", "2024-3", ""] {
        let r = usecase.execute(input(month, None)).await;
        assert!(
            matches!(r, Err(HrServiceError::InvalidRequest(_))),
            "{month}: got {r:?}"
        );
    }
    assert!(gate.store.is_empty().unwrap());
}

#[tokio::test]
async fn should_report_unknown_department() {
    let (gate, _clock) = manual_gate();
    let usecase = RequestPayrollAccessUseCase {
        gate: &gate,
        payroll: test_ledger(),
        delivery: RecordingDelivery::default(),
    };

    let r = usecase.execute(input("2024-03", Some("marketing"))).await;
    assert!(matches!(r, Err(HrServiceError::PayrollNotFound)), "got {r:?}");
    assert!(gate.store.is_empty().unwrap());
}

#[tokio::test]
async fn should_keep_issued_code_when_delivery_fails() {
    let (gate, _clock) = manual_gate();
    let usecase = RequestPayrollAccessUseCase {
        gate: &gate,
        payroll: test_ledger(),
        delivery: RecordingDelivery::failing(),
    };

    let out = usecase.execute(input("2024-03", None)).await.unwrap();
    assert_eq!(gate.store.len().unwrap(), 1);
    assert!(
        UnlockPayrollUseCase { gate: &gate }
            .execute("hr-officer", &out.code)
            .is_ok()
    );
}
