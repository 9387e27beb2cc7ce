use chrono::TimeDelta;
use serde::Deserialize;

use attendo_core::config::Config;

use crate::domain::types::{InvalidPolicy, OtpPolicy};

/// HR service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct HrConfig {
    /// HMAC secret verifying session access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3120). Env var: `HR_PORT`.
    #[serde(default = "default_port")]
    pub hr_port: u16,
    /// Domain attribute used when clearing the session cookie.
    #[serde(default = "default_cookie_domain")]
    pub cookie_domain: String,
    #[serde(default = "default_code_length")]
    pub otp_code_length: usize,
    #[serde(default = "default_expiry_secs")]
    pub otp_expiry_secs: i64,
    #[serde(default = "default_max_attempts")]
    pub otp_max_attempts: u32,
    #[serde(default = "default_lockout_secs")]
    pub otp_lockout_secs: i64,
    /// Stale-record sweep period; `0` leaves eviction purely lazy.
    #[serde(default = "default_sweep_interval_secs")]
    pub otp_sweep_interval_secs: u64,
}

fn default_port() -> u16 {
    3120
}

fn default_cookie_domain() -> String {
    "localhost".to_owned()
}

fn default_code_length() -> usize {
    6
}

fn default_expiry_secs() -> i64 {
    600
}

fn default_max_attempts() -> u32 {
    3
}

fn default_lockout_secs() -> i64 {
    1800
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Config for HrConfig {}

impl HrConfig {
    pub fn otp_policy(&self) -> Result<OtpPolicy, InvalidPolicy> {
        let expiry =
            TimeDelta::try_seconds(self.otp_expiry_secs).ok_or(InvalidPolicy::Expiry)?;
        let lockout =
            TimeDelta::try_seconds(self.otp_lockout_secs).ok_or(InvalidPolicy::Lockout)?;
        OtpPolicy::new(self.otp_code_length, expiry, self.otp_max_attempts, lockout)
    }
}
