//! Permission guards for route handlers and routers.
//!
//! Authentication is always decided before authorization: a request without
//! a session is [`Access::Unauthorized`] whatever it asks for.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use attendo_domain::{Permission, rbac};

use crate::session::{Session, SessionKey};

/// Permission check failed for an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("forbidden")]
pub struct Denied;

/// What a guarded operation needs from the caller's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    One(Permission),
    Any(Vec<Permission>),
    All(Vec<Permission>),
}

impl Requirement {
    pub fn is_met_by(&self, session: &Session) -> bool {
        match self {
            Self::One(p) => rbac::has_permission(session.role, *p),
            Self::Any(ps) => rbac::has_any_permission(session.role, ps),
            Self::All(ps) => rbac::has_all_permissions(session.role, ps),
        }
    }
}

impl From<Permission> for Requirement {
    fn from(p: Permission) -> Self {
        Self::One(p)
    }
}

/// Guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Unauthorized,
    Forbidden,
}

pub fn check_access(session: Option<&Session>, requirement: &Requirement) -> Access {
    match session {
        None => Access::Unauthorized,
        Some(s) if requirement.is_met_by(s) => Access::Allowed,
        Some(_) => Access::Forbidden,
    }
}

/// Structured guard failure returned to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    Unauthorized,
    Forbidden,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "unauthorized"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden"),
        };
        let body = serde_json::json!({ "kind": kind, "message": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Router-level guard state for [`require_access`].
#[derive(Debug, Clone)]
pub struct RouteGuard {
    pub key: SessionKey,
    pub requirement: Requirement,
}

impl RouteGuard {
    pub fn new(key: SessionKey, requirement: impl Into<Requirement>) -> Self {
        Self {
            key,
            requirement: requirement.into(),
        }
    }
}

/// Middleware gating every route below it on a [`Requirement`].
///
/// Apply with `route_layer(from_fn_with_state(guard, require_access))`.
/// On success the resolved [`Session`] is stored in request extensions, so
/// handlers can extract it without verifying the token again.
pub async fn require_access(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = Session::resolve(request.headers(), &guard.key);
    match check_access(session.as_ref(), &guard.requirement) {
        Access::Allowed => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        Access::Unauthorized => GuardRejection::Unauthorized.into_response(),
        Access::Forbidden => {
            tracing::info!(
                requirement = ?guard.requirement,
                role = ?session.as_ref().map(|s| s.role),
                "route guard denied request"
            );
            GuardRejection::Forbidden.into_response()
        }
    }
}
