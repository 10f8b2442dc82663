//! # Validated JSON Extractor
//!
//! Parses a request body and runs its `validator` rules before the handler
//! sees it. Both kinds of rejection are reported as [`AppError`]. Handlers
//! take `Result<ValidatedJson<T>, AppError>` when a rejected body must be
//! reported differently, e.g. after checking that the target row exists.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use tracing::warn;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Axum extractor for a JSON body that has passed validation.
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     ValidatedJson(payload): ValidatedJson<CreateInvoiceRequest>,
/// ) -> AppResult<impl IntoResponse> { ... }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                warn!(error = %rejection, "Rejected JSON body");
                AppError::Rejected {
                    status: rejection.status(),
                    message: rejection.body_text(),
                }
            })?;

        if let Err(errors) = payload.validate() {
            let message = describe(&errors);
            warn!(%message, "Request body failed validation");
            return Err(AppError::Validation(message));
        }

        Ok(Self(payload))
    }
}

/// One `field: reason` entry per invalid field, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let reasons: Vec<&str> = field_errors
                .iter()
                .map(|e| e.message.as_deref().unwrap_or(e.code.as_ref()))
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
        amt: f64,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn extract(req: Request) -> Result<ValidatedJson<Sample>, AppError> {
        ValidatedJson::<Sample>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let ValidatedJson(sample) = extract(request(
            Some("application/json"),
            r#"{"name":"IBM","amt":1.5}"#,
        ))
        .await
        .unwrap();
        assert_eq!(sample.name, "IBM");
    }

    #[tokio::test]
    async fn missing_content_type_keeps_unsupported_media_type() {
        let err = extract(request(None, r#"{"name":"IBM","amt":1}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn missing_field_keeps_unprocessable_entity() {
        let err = extract(request(Some("application/json"), r#"{"amt":1}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Rejected { .. }));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn syntax_error_is_bad_request() {
        let err = extract(request(Some("application/json"), "{not json"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_message_names_fields_only() {
        let err = extract(request(
            Some("application/json"),
            r#"{"name":"","amt":0}"#,
        ))
        .await
        .unwrap_err();

        match err {
            AppError::Validation(message) => assert_eq!(
                message,
                "amt: must be greater than 0; name: must not be empty"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
