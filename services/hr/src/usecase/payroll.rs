use chrono::{DateTime, Utc};

use crate::domain::ports::{Clock, OtpDelivery, OtpStore, PayrollSource};
use crate::domain::types::{OtpMetadata, PayrollSummary, Released, is_valid_month};
use crate::error::HrServiceError;
use crate::usecase::otp::OtpGate;

// ── RequestPayrollAccess ─────────────────────────────────────────────────────

pub struct RequestPayrollAccessInput {
    pub recipient: String,
    pub month: String,
    pub department: Option<String>,
}

#[derive(Debug)]
pub struct RequestPayrollAccessOutput {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub metadata: OtpMetadata,
}

pub struct RequestPayrollAccessUseCase<'a, S, C, P, D>
where
    S: OtpStore,
    C: Clock,
    P: PayrollSource,
    D: OtpDelivery,
{
    pub gate: &'a OtpGate<S, C>,
    pub payroll: P,
    pub delivery: D,
}

impl<S, C, P, D> RequestPayrollAccessUseCase<'_, S, C, P, D>
where
    S: OtpStore,
    C: Clock,
    P: PayrollSource,
    D: OtpDelivery,
{
    pub async fn execute(
        &self,
        input: RequestPayrollAccessInput,
    ) -> Result<RequestPayrollAccessOutput, HrServiceError> {
        // 1. Validate month -> 400
        if !is_valid_month(&input.month) {
            return Err(HrServiceError::InvalidRequest(format!(
                "month must be YYYY-MM, got {:?}",
                input.month
            )));
        }
        let department = input
            .department
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty());

        // 2. Build the payload -> 404 for an unknown department
        let summary = self
            .payroll
            .summarize(&input.month, department.as_deref())
            .await?
            .ok_or(HrServiceError::PayrollNotFound)?;
        let payload =
            serde_json::to_value(&summary).map_err(|e| HrServiceError::Internal(e.into()))?;

        // 3. Bind it to a fresh code, replacing any pending one
        let metadata = OtpMetadata {
            month: input.month,
            department,
        };
        let issued = self.gate.issue(&input.recipient, payload, metadata)?;

        // 4. Hand the code to the delivery channel; failures do not undo issuance
        if let Err(e) = self
            .delivery
            .deliver(&input.recipient, &issued.code, &issued.metadata)
            .await
        {
            tracing::warn!(recipient = %input.recipient, error = %e, "otp delivery failed");
        }

        Ok(RequestPayrollAccessOutput {
            code: issued.code,
            expires_at: issued.expires_at,
            metadata: issued.metadata,
        })
    }
}

// ── UnlockPayroll ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct UnlockPayrollOutput {
    pub metadata: OtpMetadata,
    pub payroll: PayrollSummary,
}

pub struct UnlockPayrollUseCase<'a, S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub gate: &'a OtpGate<S, C>,
}

impl<S, C> UnlockPayrollUseCase<'_, S, C>
where
    S: OtpStore,
    C: Clock,
{
    pub fn execute(
        &self,
        recipient: &str,
        code: &str,
    ) -> Result<UnlockPayrollOutput, HrServiceError> {
        let Released { payload, metadata } = self.gate.verify(recipient, code)?;
        // The gate only ever holds payloads this service serialised itself.
        let payroll = serde_json::from_value(payload)
            .map_err(|e| HrServiceError::Internal(anyhow::Error::new(e).context("corrupt payroll payload")))?;
        Ok(UnlockPayrollOutput { metadata, payroll })
    }
}
