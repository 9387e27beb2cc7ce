use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default OTP code length in digits.
pub const OTP_CODE_LEN: usize = 6;

/// Longest code length accepted by [`OtpPolicy::new`].
pub const OTP_CODE_MAX_LEN: usize = 12;

/// Default OTP time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// Default failed attempts before lockout.
pub const OTP_MAX_ATTEMPTS: u32 = 3;

/// Default lockout duration in seconds (30 minutes).
pub const OTP_LOCKOUT_SECS: i64 = 1800;

/// Longest expiry accepted by [`OtpPolicy::new`] (one day).
pub const OTP_TTL_MAX_SECS: i64 = 86_400;

/// Longest lockout accepted by [`OtpPolicy::new`] (one week).
pub const OTP_LOCKOUT_MAX_SECS: i64 = 604_800;

/// Tunables of the OTP gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    pub code_length: usize,
    pub expiry: Duration,
    pub max_attempts: u32,
    pub lockout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPolicy {
    #[error("code length must be between 1 and {}", OTP_CODE_MAX_LEN)]
    CodeLength,
    #[error("expiry must be between 1 and {} seconds", OTP_TTL_MAX_SECS)]
    Expiry,
    #[error("at least one attempt must be allowed")]
    MaxAttempts,
    #[error("lockout must be between 1 and {} seconds", OTP_LOCKOUT_MAX_SECS)]
    Lockout,
}

impl OtpPolicy {
    pub fn new(
        code_length: usize,
        expiry: Duration,
        max_attempts: u32,
        lockout: Duration,
    ) -> Result<Self, InvalidPolicy> {
        if code_length == 0 || code_length > OTP_CODE_MAX_LEN {
            return Err(InvalidPolicy::CodeLength);
        }
        if expiry <= Duration::zero() || expiry > Duration::seconds(OTP_TTL_MAX_SECS) {
            return Err(InvalidPolicy::Expiry);
        }
        if max_attempts == 0 {
            return Err(InvalidPolicy::MaxAttempts);
        }
        if lockout <= Duration::zero() || lockout > Duration::seconds(OTP_LOCKOUT_MAX_SECS) {
            return Err(InvalidPolicy::Lockout);
        }
        Ok(Self {
            code_length,
            expiry,
            max_attempts,
            lockout,
        })
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            code_length: OTP_CODE_LEN,
            expiry: Duration::seconds(OTP_TTL_SECS),
            max_attempts: OTP_MAX_ATTEMPTS,
            lockout: Duration::seconds(OTP_LOCKOUT_SECS),
        }
    }
}

/// Non-secret description of what an OTP unlocks. Sent alongside the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpMetadata {
    pub month: String,
    pub department: Option<String>,
}

impl fmt::Display for OtpMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.department {
            Some(dept) => write!(f, "payroll {} ({dept})", self.month),
            None => write!(f, "payroll {} (all departments)", self.month),
        }
    }
}

/// Live one-time code for one recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpRecord {
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub failed_attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
    /// Opaque data handed back once on successful verification.
    pub payload: serde_json::Value,
    pub metadata: OtpMetadata,
}

/// What a successful verification hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct Released {
    pub payload: serde_json::Value,
    pub metadata: OtpMetadata,
}

/// Issued code as seen by the caller responsible for delivery.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub metadata: OtpMetadata,
}

/// Per-employee compensation entry. Amounts are in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compensation {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub base_salary: i64,
    pub allowances: i64,
    pub deductions: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub gross: i64,
    pub deductions: i64,
    pub net: i64,
}

/// Payroll totals for a month, optionally narrowed to one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    pub month: String,
    pub department: Option<String>,
    pub headcount: usize,
    pub total_gross: i64,
    pub total_deductions: i64,
    pub total_net: i64,
    pub lines: Vec<PayrollLine>,
}

impl PayrollSummary {
    pub fn from_entries<'a>(
        month: &str,
        department: Option<&str>,
        entries: impl IntoIterator<Item = &'a Compensation>,
    ) -> Self {
        let lines: Vec<PayrollLine> = entries
            .into_iter()
            .map(|c| {
                let gross = c.base_salary + c.allowances;
                PayrollLine {
                    employee_id: c.employee_id.clone(),
                    name: c.name.clone(),
                    department: c.department.clone(),
                    gross,
                    deductions: c.deductions,
                    net: gross - c.deductions,
                }
            })
            .collect();
        Self {
            month: month.to_owned(),
            department: department.map(str::to_owned),
            headcount: lines.len(),
            total_gross: lines.iter().map(|l| l.gross).sum(),
            total_deductions: lines.iter().map(|l| l.deductions).sum(),
            total_net: lines.iter().map(|l| l.net).sum(),
            lines,
        }
    }
}

/// Validate a `YYYY-MM` payroll month.
pub fn is_valid_month(month: &str) -> bool {
    month.len() == 7
        && chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok()
}
