use std::sync::Arc;

use crate::domain::ports::PayrollSource;
use crate::domain::types::{Compensation, PayrollSummary};
use crate::error::HrServiceError;

/// Read-only compensation ledger held in memory.
#[derive(Clone, Default)]
pub struct InMemoryPayrollLedger {
    entries: Arc<Vec<Compensation>>,
}

impl InMemoryPayrollLedger {
    pub fn new(entries: Vec<Compensation>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Small fixed staff roster used when no ledger is configured.
    pub fn sample() -> Self {
        let entry = |id: &str, name: &str, dept: &str, base: i64, allow: i64, deduct: i64| {
            Compensation {
                employee_id: id.to_owned(),
                name: name.to_owned(),
                department: dept.to_owned(),
                base_salary: base,
                allowances: allow,
                deductions: deduct,
            }
        };
        Self::new(vec![
            entry("EMP-001", "Amara Okafor", "engineering", 720_000, 45_000, 152_000),
            entry("EMP-002", "Jonas Lindqvist", "engineering", 655_000, 30_000, 131_000),
            entry("EMP-003", "Priya Raman", "hr", 540_000, 25_000, 108_000),
            entry("EMP-004", "Diego Morales", "operations", 480_000, 60_000, 96_000),
            entry("EMP-005", "Mei Tanaka", "operations", 455_000, 40_000, 88_000),
            entry("EMP-006", "Samuel Mensah", "finance", 610_000, 35_000, 122_000),
        ])
    }
}

impl PayrollSource for InMemoryPayrollLedger {
    async fn summarize(
        &self,
        month: &str,
        department: Option<&str>,
    ) -> Result<Option<PayrollSummary>, HrServiceError> {
        let Some(dept) = department else {
            return Ok(Some(PayrollSummary::from_entries(
                month,
                None,
                self.entries.iter(),
            )));
        };
        let matching: Vec<&Compensation> = self
            .entries
            .iter()
            .filter(|c| c.department.eq_ignore_ascii_case(dept))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }
        Ok(Some(PayrollSummary::from_entries(
            month,
            Some(dept),
            matching,
        )))
    }
}
