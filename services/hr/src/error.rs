use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use attendo_auth_types::guard::{Denied, GuardRejection};

use crate::domain::otp::lockout_minutes;

/// HR service error variants.
///
/// OTP failures are expected outcomes that callers branch on; only
/// `Internal` represents a fault.
#[derive(Debug, thiserror::Error)]
pub enum HrServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("payroll not found")]
    PayrollNotFound,
    #[error("otp not found")]
    OtpNotFound,
    #[error("otp expired")]
    OtpExpired,
    #[error("otp locked")]
    OtpLocked { retry_after_secs: i64 },
    #[error("otp mismatch")]
    OtpMismatch { remaining_attempts: u32 },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl HrServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::PayrollNotFound => "PAYROLL_NOT_FOUND",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpLocked { .. } => "OTP_LOCKED",
            Self::OtpMismatch { .. } => "OTP_MISMATCH",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<GuardRejection> for HrServiceError {
    fn from(rejection: GuardRejection) -> Self {
        match rejection {
            GuardRejection::Unauthorized => Self::Unauthorized,
            GuardRejection::Forbidden => Self::Forbidden,
        }
    }
}

impl From<Denied> for HrServiceError {
    fn from(_: Denied) -> Self {
        Self::Forbidden
    }
}

impl IntoResponse for HrServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayrollNotFound | Self::OtpNotFound => StatusCode::NOT_FOUND,
            Self::OtpExpired => StatusCode::GONE,
            Self::OtpLocked { .. } => StatusCode::LOCKED,
            Self::OtpMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only; the anyhow chain is the only trace of the root cause.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        match &self {
            Self::OtpLocked { retry_after_secs } => {
                body["retry_after_secs"] = (*retry_after_secs).into();
                body["lockout_minutes"] = lockout_minutes(*retry_after_secs).into();
                let mut resp = (status, axum::Json(body)).into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                    resp.headers_mut().insert(header::RETRY_AFTER, value);
                }
                resp
            }
            Self::OtpMismatch { remaining_attempts } => {
                body["remaining_attempts"] = (*remaining_attempts).into();
                (status, axum::Json(body)).into_response()
            }
            _ => (status, axum::Json(body)).into_response(),
        }
    }
}
