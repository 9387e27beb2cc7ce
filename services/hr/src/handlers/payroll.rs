use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use attendo_auth_types::session::Session;
use attendo_domain::Permission;

use crate::domain::types::{OtpMetadata, PayrollSummary};
use crate::error::HrServiceError;
use crate::state::AppState;
use crate::usecase::payroll::{
    RequestPayrollAccessInput, RequestPayrollAccessUseCase, UnlockPayrollUseCase,
};

// ── POST /payroll/otp ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestAccessBody {
    pub month: String,
    pub department: Option<String>,
}

#[derive(Serialize)]
pub struct RequestAccessResponse {
    #[serde(serialize_with = "attendo_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub metadata: OtpMetadata,
}

pub async fn request_access(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RequestAccessBody>,
) -> Result<(StatusCode, Json<RequestAccessResponse>), HrServiceError> {
    session.require(Permission::ViewPayroll)?;

    let usecase = RequestPayrollAccessUseCase {
        gate: &state.gate,
        payroll: state.payroll_source(),
        delivery: state.otp_delivery(),
    };
    let out = usecase
        .execute(RequestPayrollAccessInput {
            recipient: session.user_id.to_string(),
            month: body.month,
            department: body.department,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RequestAccessResponse {
            expires_at: out.expires_at,
            metadata: out.metadata,
        }),
    ))
}

// ── POST /payroll/otp/verify ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyBody {
    pub code: String,
}

#[derive(Serialize)]
pub struct UnlockedPayrollResponse {
    pub metadata: OtpMetadata,
    pub payroll: PayrollSummary,
}

pub async fn verify_access(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<VerifyBody>,
) -> Result<Json<UnlockedPayrollResponse>, HrServiceError> {
    session.require(Permission::ViewPayroll)?;

    let usecase = UnlockPayrollUseCase { gate: &state.gate };
    let out = usecase.execute(&session.user_id.to_string(), &body.code)?;
    Ok(Json(UnlockedPayrollResponse {
        metadata: out.metadata,
        payroll: out.payroll,
    }))
}

// ── DELETE /payroll/otp ───────────────────────────────────────────────────────

pub async fn cancel_access(
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, HrServiceError> {
    session.require(Permission::ViewPayroll)?;
    state.gate.clear(&session.user_id.to_string())?;
    Ok(StatusCode::NO_CONTENT)
}
