mod helpers;
mod otp_test;
mod payroll_test;
