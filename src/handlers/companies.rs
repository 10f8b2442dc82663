//! # Company Handlers
//!
//! CRUD endpoints under `/companies`. Store failures and unusable bodies are
//! logged and replaced with a fixed 500 message; a missing company is a 404.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::StatusResponse;
use crate::error::{AppError, AppResult, OrInternal};
use crate::extract::ValidatedJson;
use crate::models::{AppState, Company, CompanySummary};
use crate::utils::slug::slugify;

const COMPANY_NOT_FOUND: &str = "Company not found";
const CREATE_FAILED: &str = "Server Error, Could not create a new company";
const UPDATE_FAILED: &str = "Server Error. Could not update company";

/// Request payload for creating a company.
///
/// `code` may be omitted, in which case it is derived from `name`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

/// Request payload for replacing a company's details.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompaniesResponse {
    pub companies: Vec<CompanySummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub company: Company,
}

/// Lists all companies.
///
/// GET /companies
///
/// # Returns
///
/// - `200 OK` with `{companies: [{code, name}]}`
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_companies(State(state): State<Arc<AppState>>) -> AppResult<Json<CompaniesResponse>> {
    let companies = Company::list(&state.db_pool)
        .await
        .or_internal("Server Error. Could not retrieve companies")?;

    debug!(count = companies.len(), "Companies retrieved");
    Ok(Json(CompaniesResponse { companies }))
}

/// Gets one company by code.
///
/// GET /companies/{code}
///
/// # Returns
///
/// - `200 OK` with `{company: {code, name, description}}`
/// - `404 Not Found` - No company has this code
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(code = %code, request_id = %uuid::Uuid::new_v4()))]
pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<Json<CompanyResponse>> {
    match Company::find(&state.db_pool, &code)
        .await
        .or_internal("Server Error. Could not retrieve company")?
    {
        Some(company) => Ok(Json(CompanyResponse { company })),
        None => {
            warn!("Company not found");
            Err(AppError::NotFound(COMPANY_NOT_FOUND))
        }
    }
}

/// Creates a company.
///
/// POST /companies CreateCompanyRequest
///
/// # Returns
///
/// - `201 Created` with `{company: {...}}`
/// - `500 Internal Server Error` - Any failure: an unusable body, a name with
///   no usable code, or a database error such as a duplicate code or name
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create_company(
    State(state): State<Arc<AppState>>,
    payload: Result<ValidatedJson<CreateCompanyRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    let ValidatedJson(payload) =
        payload.map_err(|rejection| rejection.reclassify(CREATE_FAILED))?;

    let code = match payload.code {
        Some(code) => code,
        None => slugify(&payload.name),
    };
    if code.is_empty() {
        warn!(name = %payload.name, "Cannot derive a company code from name");
        return Err(AppError::Internal(CREATE_FAILED));
    }

    let company = Company::insert(
        &state.db_pool,
        &code,
        &payload.name,
        payload.description.as_deref(),
    )
    .await
    .or_internal(CREATE_FAILED)?;

    info!(code = %company.code, "Company created");
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// Replaces a company's name and description.
///
/// PUT /companies/{code} UpdateCompanyRequest
///
/// # Returns
///
/// - `200 OK` with `{company: {...}}`
/// - `404 Not Found` - No company has this code, whatever the body
/// - `500 Internal Server Error` - Unusable body or database error
#[instrument(skip_all, fields(code = %code, request_id = %uuid::Uuid::new_v4()))]
pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    payload: Result<ValidatedJson<UpdateCompanyRequest>, AppError>,
) -> AppResult<Json<CompanyResponse>> {
    let payload = match payload {
        Ok(ValidatedJson(payload)) => payload,
        Err(rejection) => {
            let existing = Company::find(&state.db_pool, &code)
                .await
                .or_internal(UPDATE_FAILED)?;
            if existing.is_none() {
                warn!("Company to update not found");
                return Err(AppError::NotFound(COMPANY_NOT_FOUND));
            }
            return Err(rejection.reclassify(UPDATE_FAILED));
        }
    };

    let updated = Company::update(
        &state.db_pool,
        &code,
        &payload.name,
        payload.description.as_deref(),
    )
    .await
    .or_internal(UPDATE_FAILED)?;

    match updated {
        Some(company) => {
            info!("Company updated");
            Ok(Json(CompanyResponse { company }))
        }
        None => {
            warn!("Company to update not found");
            Err(AppError::NotFound(COMPANY_NOT_FOUND))
        }
    }
}

/// Deletes a company and, through the store's cascade, its invoices.
///
/// DELETE /companies/{code}
///
/// # Returns
///
/// - `200 OK` with `{status: "deleted"}`
/// - `404 Not Found` - No company has this code
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(code = %code, request_id = %uuid::Uuid::new_v4()))]
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let deleted = Company::delete(&state.db_pool, &code)
        .await
        .or_internal("Server Error. Could not delete company")?;

    if deleted.is_none() {
        warn!("Company to delete not found");
        return Err(AppError::NotFound(COMPANY_NOT_FOUND));
    }

    info!("Company deleted");
    Ok(Json(StatusResponse::deleted()))
}
