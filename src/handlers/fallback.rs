//! # Unmatched Routes
//!
//! Any request no route accepts, by path or by method, gets the 404 envelope.

use axum::http::{Method, Uri};
use tracing::{instrument, warn};

use crate::error::AppError;

#[instrument(skip_all)]
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    warn!(%method, %uri, "No route matched request");
    AppError::NotFound("Not Found")
}
