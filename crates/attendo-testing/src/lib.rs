//! Test utilities for Attendo services.
//!
//! Provides `MockSession` for minting signed sessions and small response helpers.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;

use axum::body::{Body, to_bytes};
use axum::response::Response;

/// Collect a response body as JSON.
///
/// Panics on a body that is not valid JSON.
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
