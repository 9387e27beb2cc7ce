use axum::Json;
use axum::extract::Path;

use attendo_domain::{Permission, RolePermissionMap, grants_named};

/// `GET /rbac/roles`: the full role -> permission table.
pub async fn list_roles() -> Json<RolePermissionMap> {
    Json(RolePermissionMap::standard())
}

/// `GET /rbac/roles/{role}`: grants for one role name. An unknown name is
/// answered with an empty list, the same as a role with no grants.
pub async fn role_permissions(Path(role): Path<String>) -> Json<&'static [Permission]> {
    Json(grants_named(&role))
}
