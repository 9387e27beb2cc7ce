pub mod otp;
pub mod ports;
pub mod types;
