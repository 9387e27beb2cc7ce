use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use attendo_auth_types::guard::{RouteGuard, require_access};
use attendo_core::health::health_routes;
use attendo_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};
use attendo_domain::Permission;

use crate::handlers::{
    payroll::{cancel_access, request_access, verify_access},
    rbac::{list_roles, role_permissions},
    session::{check_session, end_session},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Admin routes are gated as a group; payroll handlers check per call.
    let admin = Router::new()
        .route("/rbac/roles", get(list_roles))
        .route("/rbac/roles/{role}", get(role_permissions))
        .route_layer(from_fn_with_state(
            RouteGuard::new(state.session_key.clone(), Permission::ManageUsers),
            require_access,
        ));

    Router::new()
        .merge(health_routes())
        // Session
        .route("/auth/session", get(check_session).delete(end_session))
        // Payroll OTP
        .route("/payroll/otp", post(request_access).delete(cancel_access))
        .route("/payroll/otp/verify", post(verify_access))
        .merge(admin)
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
