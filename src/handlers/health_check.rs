//! # Health Check Handler
//!
//! Readiness endpoint for load balancers and the integration tests.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Returns `200 OK` with an empty body. Does not touch the database.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
