//! Server-verified session resolution and the `Session` extractor.
//!
//! The role is read only from a signed access token, taken from the
//! `attendo_access_token` cookie or an `Authorization: Bearer` header.
//! Anything that does not verify resolves to "no session".

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::CookieJar;
use http::HeaderMap;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use attendo_domain::{Permission, Role, rbac};

use crate::cookie::ATTENDO_ACCESS_TOKEN;
use crate::guard::{Denied, GuardRejection};
use crate::token::validate_access_token;

/// Secret used to verify session tokens. Expose it from service state with
/// `FromRef` so the extractors can find it.
#[derive(Clone)]
pub struct SessionKey(Arc<str>);

impl SessionKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// Verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
    pub expires_at: u64,
}

impl Session {
    /// Resolve a session from request headers. `None` means "no session".
    pub fn resolve(headers: &HeaderMap, key: &SessionKey) -> Option<Self> {
        let token = bearer_token(headers).or_else(|| cookie_token(headers))?;
        match validate_access_token(&token, key.secret()) {
            Ok(info) => Some(Self {
                user_id: info.user_id,
                role: info.role,
                expires_at: info.expires_at,
            }),
            Err(e) => {
                tracing::debug!(reason = %e, "session token rejected");
                None
            }
        }
    }

    pub fn has(&self, permission: Permission) -> bool {
        rbac::has_permission(self.role, permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), Denied> {
        if self.has(permission) { Ok(()) } else { Err(Denied) }
    }

    pub fn require_any(&self, permissions: &[Permission]) -> Result<(), Denied> {
        if rbac::has_any_permission(self.role, permissions) {
            Ok(())
        } else {
            Err(Denied)
        }
    }

    pub fn require_all(&self, permissions: &[Permission]) -> Result<(), Denied> {
        if rbac::has_all_permissions(self.role, permissions) {
            Ok(())
        } else {
            Err(Denied)
        }
    }

    /// Everything this session's role is granted, sorted.
    pub fn permissions(&self) -> BTreeSet<Permission> {
        rbac::default_grants(self.role).iter().copied().collect()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(ATTENDO_ACCESS_TOKEN)
        .map(|c| c.value().to_owned())
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionKey: FromRef<S>,
{
    type Rejection = GuardRejection;

    // Resolve synchronously and return a 'static future; axum-core 0.5 wants
    // `impl Future + Send` without borrowing `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .or_else(|| Session::resolve(&parts.headers, &SessionKey::from_ref(state)));

        async move { session.ok_or(GuardRejection::Unauthorized) }
    }
}
