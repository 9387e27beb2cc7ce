//! Permission tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Atomic capability checked against a role's granted set.
///
/// Permissions are flat: no token implies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ManageUsers,
    ViewAllAttendance,
    ViewTeamAttendance,
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
}

/// Returned when a token does not name any known [`Permission`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl Permission {
    pub const ALL: [Permission; 15] = [
        Permission::ManageUsers,
        Permission::ViewAllAttendance,
        Permission::ViewTeamAttendance,
        Permission::ViewOwnAttendance,
        Permission::ManageAttendance,
        Permission::CheckIn,
        Permission::RequestLeave,
        Permission::ApproveLeave,
        Permission::ViewPayroll,
        Permission::ManagePayroll,
        Permission::ViewBulletins,
        Permission::ManageBulletins,
        Permission::ReportIssues,
        Permission::ManageIssues,
        Permission::ViewReports,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManageUsers => "manage_users",
            Self::ViewAllAttendance => "view_all_attendance",
            Self::ViewTeamAttendance => "view_team_attendance",
            Self::ViewOwnAttendance => "view_own_attendance",
            Self::ManageAttendance => "manage_attendance",
            Self::CheckIn => "check_in",
            Self::RequestLeave => "request_leave",
            Self::ApproveLeave => "approve_leave",
            Self::ViewPayroll => "view_payroll",
            Self::ManagePayroll => "manage_payroll",
            Self::ViewBulletins => "view_bulletins",
            Self::ManageBulletins => "manage_bulletins",
            Self::ReportIssues => "report_issues",
            Self::ManageIssues => "manage_issues",
            Self::ViewReports => "view_reports",
        }
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_owned()))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
