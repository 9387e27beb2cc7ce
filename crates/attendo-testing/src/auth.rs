//! Session helpers for integration tests.
//!
//! Services resolve the caller's role only from a signed token. `MockSession`
//! mints such tokens with the test secret so requests carry a real session.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, header};
use uuid::Uuid;

use attendo_auth_types::cookie::ATTENDO_ACCESS_TOKEN;
use attendo_auth_types::token::issue_access_token;
use attendo_domain::Role;

/// A staff identity to sign into test requests.
#[derive(Debug, Clone)]
pub struct MockSession {
    pub user_id: Uuid,
    pub role: Role,
    pub secret: String,
}

impl MockSession {
    pub fn new(role: Role, secret: &str) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            role,
            secret: secret.to_owned(),
        }
    }

    /// Token valid for one hour.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs()
            + 3600;
        issue_access_token(self.user_id, self.role, exp, &self.secret).expect("mint test token")
    }

    /// Token that expired an hour ago.
    pub fn expired_token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs()
            - 3600;
        issue_access_token(self.user_id, self.role, exp, &self.secret).expect("mint test token")
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }

    pub fn cookie(&self) -> String {
        format!("{ATTENDO_ACCESS_TOKEN}={}", self.token())
    }

    /// `Authorization` header map for the session.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&self.bearer()).expect("valid header value"),
        );
        map
    }
}
