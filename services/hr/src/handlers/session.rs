use std::collections::BTreeSet;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attendo_auth_types::{cookie::clear_access_token_cookie, session::Session};
use attendo_domain::{Permission, Role};

use crate::error::HrServiceError;
use crate::state::AppState;

// ── GET /auth/session ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckSessionQuery {
    /// Permission the client wants to render a view for.
    pub permission: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub role: Role,
    pub permissions: BTreeSet<Permission>,
    pub expires_at: u64,
}

/// Session summary for client-side view gating.
///
/// With `?permission=`, answers 403 unless the caller holds it, so a client
/// can decide whether to render a view or redirect.
pub async fn check_session(
    session: Session,
    Query(query): Query<CheckSessionQuery>,
) -> Result<Json<SessionResponse>, HrServiceError> {
    if let Some(token) = query.permission {
        let permission = token
            .parse::<Permission>()
            .map_err(|e| HrServiceError::InvalidRequest(e.to_string()))?;
        session.require(permission)?;
    }

    Ok(Json(SessionResponse {
        user_id: session.user_id,
        role: session.role,
        permissions: session.permissions(),
        expires_at: session.expires_at,
    }))
}

// ── DELETE /auth/session ──────────────────────────────────────────────────────

/// Sign out: drop any pending payroll code and expire the session cookie.
pub async fn end_session(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> Result<impl IntoResponse, HrServiceError> {
    state.gate.clear(&session.user_id.to_string())?;
    let jar = clear_access_token_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
