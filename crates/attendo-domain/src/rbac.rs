//! Role -> permission table and the access predicates evaluated over it.
//!
//! The built-in grants live in [`default_grants`], an exhaustive `match` so
//! adding a [`Role`] fails to compile until it has an entry. Every check in
//! the workspace goes through the predicates below.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::permission::Permission;
use crate::role::Role;

use Permission::*;

/// Permissions granted to `role` by the built-in table.
pub fn default_grants(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &Permission::ALL,
        Role::Hr => &[
            ViewAllAttendance,
            ViewOwnAttendance,
            ManageAttendance,
            CheckIn,
            RequestLeave,
            ApproveLeave,
            ViewPayroll,
            ManagePayroll,
            ViewBulletins,
            ManageBulletins,
            ReportIssues,
            ManageIssues,
            ViewReports,
        ],
        Role::Supervisor => &[
            ViewTeamAttendance,
            ViewOwnAttendance,
            CheckIn,
            RequestLeave,
            ApproveLeave,
            ViewBulletins,
            ReportIssues,
            ManageIssues,
            ViewReports,
        ],
        Role::Employee => &[
            ViewOwnAttendance,
            CheckIn,
            RequestLeave,
            ViewBulletins,
            ReportIssues,
        ],
    }
}

/// True iff the built-in table grants `permission` to `role`.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    default_grants(role).contains(&permission)
}

/// True iff at least one of `permissions` is granted. False for an empty slice.
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// True iff every one of `permissions` is granted. True for an empty slice.
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Built-in grants looked up by wire name. Unknown names yield no
/// permissions rather than an error.
pub fn grants_named(role: &str) -> &'static [Permission] {
    role.parse::<Role>().map(default_grants).unwrap_or(&[])
}

/// The built-in table in owned form, keyed by role, for serving to clients.
///
/// Every [`Role`] always has an entry, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RolePermissionMap {
    entries: BTreeMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionMap {
    pub fn standard() -> Self {
        Self {
            entries: Role::ALL
                .into_iter()
                .map(|r| (r, default_grants(r).iter().copied().collect()))
                .collect(),
        }
    }
}
