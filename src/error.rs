//! # Centralized Error Handling
//!
//! Every failure a handler can produce is funneled through [`AppError`] and
//! rendered as the same JSON envelope:
//!
//! ```json
//! { "error": { "message": "Company not found", "status": 404 }, "message": "Company not found" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Central application error type.
///
/// `NotFound` and `Internal` carry fixed messages that are safe to show to
/// clients. `Db` and `Unhandled` are unintercepted failures: their text is
/// attached to a 500 response as-is.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("internal server error: {0}")]
    Internal(&'static str),

    #[error("unhandled failure: {0}")]
    Unhandled(String),

    #[error("rejected request body: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("validation failed: {0}")]
    Validation(String),
}

impl AppError {
    /// HTTP status the error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Db(_) | AppError::Internal(_) | AppError::Unhandled(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected { status, .. } => *status,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Message shown to the client.
    fn into_message(self) -> String {
        match self {
            AppError::Db(e) => e.to_string(),
            AppError::NotFound(msg) | AppError::Internal(msg) => msg.to_owned(),
            AppError::Unhandled(msg)
            | AppError::Rejected { message: msg, .. }
            | AppError::Validation(msg) => msg,
        }
    }

    /// Replaces the error with a fixed, client-safe 500.
    pub fn reclassify(self, message: &'static str) -> AppError {
        warn!(error = %self, "{message}");
        AppError::Internal(message)
    }

    /// Turns the error into a 500 that still carries its own text.
    pub fn unhandled(self) -> AppError {
        match self {
            AppError::Db(_) | AppError::Unhandled(_) => self,
            other => AppError::Unhandled(other.into_message()),
        }
    }
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    status: u16,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Db(e) = &self {
            error!(?e, "Unhandled database error");
        }

        let status = self.status();
        let message = self.into_message();

        let body = Json(ErrorBody {
            error: ErrorDetail {
                message: message.clone(),
                status: status.as_u16(),
            },
            message,
        });
        (status, body).into_response()
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;

/// Replaces a store failure with a fixed, client-safe 500.
///
/// The store error is logged here and never leaves the process.
pub trait OrInternal<T> {
    fn or_internal(self, message: &'static str) -> AppResult<T>;
}

impl<T> OrInternal<T> for Result<T, sqlx::Error> {
    fn or_internal(self, message: &'static str) -> AppResult<T> {
        self.map_err(|e| {
            error!(error = %e, "{message}");
            AppError::Internal(message)
        })
    }
}
