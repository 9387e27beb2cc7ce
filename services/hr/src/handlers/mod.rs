pub mod payroll;
pub mod rbac;
pub mod session;
