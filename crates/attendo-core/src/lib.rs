//! Ambient plumbing shared by Attendo services: tracing, config, health
//! endpoints and request middleware.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
