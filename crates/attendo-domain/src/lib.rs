//! Domain types shared across all Attendo services.
//!
//! Pure types and the permission table, with no framework dependencies.
//! Safe to import from any layer of a service.

pub mod permission;
pub mod rbac;
pub mod role;

pub use permission::Permission;
pub use rbac::{
    RolePermissionMap, grants_named, has_all_permissions, has_any_permission, has_permission,
};
pub use role::Role;
