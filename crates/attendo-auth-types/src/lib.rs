//! Session and access-control types shared across Attendo services.
//!
//! Provides JWT session validation, the access-token cookie, the `Session`
//! extractor and the permission guards built on it.

pub mod cookie;
pub mod guard;
pub mod session;
pub mod token;
