pub mod otp;
pub mod payroll;
