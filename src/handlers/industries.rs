//! # Industry Handlers
//!
//! Endpoints under `/industries`. Failures are not reclassified here: store
//! errors and unusable bodies reach the error envelope as a 500 with their
//! text attached.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::models::{AppState, Industry, IndustryListing};
use crate::utils::constant::ASSOCIATION_CREATED;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIndustryRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub industry: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssociateRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub company_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub industry_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndustryResponse {
    pub industry: Industry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndustriesResponse {
    pub industries: Vec<IndustryListing>,
}

/// Creates an industry.
///
/// POST /industries CreateIndustryRequest
///
/// # Returns
///
/// - `201 Created` with `{industry: {code, industry}}`
/// - `500 Internal Server Error` - Unusable body or database error, with its text
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create_industry(
    State(state): State<Arc<AppState>>,
    payload: Result<ValidatedJson<CreateIndustryRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    let ValidatedJson(payload) = payload.map_err(AppError::unhandled)?;
    let industry = Industry::insert(&state.db_pool, &payload.code, &payload.industry).await?;

    info!(code = %industry.code, "Industry created");
    Ok((StatusCode::CREATED, Json(IndustryResponse { industry })))
}

/// Lists industries with the codes of their companies.
///
/// GET /industries
///
/// Industries with no associated company are not listed.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_industries(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<IndustriesResponse>> {
    let industries = Industry::list_with_companies(&state.db_pool).await?;

    debug!(count = industries.len(), "Industries retrieved");
    Ok(Json(IndustriesResponse { industries }))
}

/// Associates a company with an industry.
///
/// POST /industries/associate AssociateRequest
///
/// Responds with a plain-text confirmation rather than JSON.
///
/// # Returns
///
/// - `201 Created` with body `Association created successfully`
/// - `500 Internal Server Error` - Unusable body or database error, with its text
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn associate_industry(
    State(state): State<Arc<AppState>>,
    payload: Result<ValidatedJson<AssociateRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    let ValidatedJson(payload) = payload.map_err(AppError::unhandled)?;
    debug!(
        company_code = %payload.company_code,
        industry_code = %payload.industry_code,
        "Associating company with industry"
    );

    Industry::associate(&state.db_pool, &payload.company_code, &payload.industry_code).await?;

    info!("Association created");
    Ok((StatusCode::CREATED, ASSOCIATION_CREATED))
}
