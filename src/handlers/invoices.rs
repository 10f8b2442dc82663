//! # Invoice Handlers
//!
//! CRUD endpoints under `/invoices`. An invoice is shown with its company
//! nested under `company`, and updating the paid flag maintains `paid_date`.
//! Store failures and unusable bodies become a fixed 500 message.

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
use crate::models::{AppState, Invoice, InvoiceDetail, InvoiceSummary};

const INVOICE_NOT_FOUND: &str = "Invoice not found";
const CREATE_FAILED: &str = "Could not create invoice";
const UPDATE_FAILED: &str = "Could not update invoice";

/// Request payload for creating an invoice.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub comp_code: String,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub amt: f64,
}

/// Request payload for updating an invoice.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInvoiceRequest {
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub amt: f64,
    pub paid: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoicesResponse {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

/// Ids that are not integers can never name a row.
fn parse_invoice_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| {
        warn!(id = raw, "Invoice id is not an integer");
        AppError::NotFound(INVOICE_NOT_FOUND)
    })
}

/// Lists all invoices.
///
/// GET /invoices
///
/// # Returns
///
/// - `200 OK` with `{invoices: [{id, comp_code}]}`
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_invoices(State(state): State<Arc<AppState>>) -> AppResult<Json<InvoicesResponse>> {
    let invoices = Invoice::list(&state.db_pool)
        .await
        .or_internal("Could not retrieve invoices")?;

    debug!(count = invoices.len(), "Invoices retrieved");
    Ok(Json(InvoicesResponse { invoices }))
}

/// Gets one invoice together with its company.
///
/// GET /invoices/{id}
///
/// # Returns
///
/// - `200 OK` with `{invoice: {id, comp_code, amt, paid, add_date, paid_date, company}}`
/// - `404 Not Found` - No invoice has this id
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(id = %id, request_id = %uuid::Uuid::new_v4()))]
pub async fn get_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<InvoiceDetailResponse>> {
    let id = parse_invoice_id(&id)?;

    match Invoice::find_with_company(&state.db_pool, id)
        .await
        .or_internal("Could not retrieve invoice")?
    {
        Some(invoice) => Ok(Json(InvoiceDetailResponse { invoice })),
        None => {
            warn!("Invoice not found");
            Err(AppError::NotFound(INVOICE_NOT_FOUND))
        }
    }
}

/// Creates an unpaid invoice for a company.
///
/// POST /invoices CreateInvoiceRequest
///
/// # Returns
///
/// - `201 Created` with `{invoice: {...}}`
/// - `500 Internal Server Error` - Any failure: an unusable body (empty
///   company code, non-positive amount) or a database error such as an
///   unknown company
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    payload: Result<ValidatedJson<CreateInvoiceRequest>, AppError>,
) -> AppResult<impl IntoResponse> {
    let ValidatedJson(payload) =
        payload.map_err(|rejection| rejection.reclassify(CREATE_FAILED))?;

    let invoice = Invoice::insert(&state.db_pool, &payload.comp_code, payload.amt)
        .await
        .or_internal(CREATE_FAILED)?;

    info!(id = invoice.id, comp_code = %invoice.comp_code, "Invoice created");
    Ok((StatusCode::CREATED, Json(InvoiceResponse { invoice })))
}

/// Updates an invoice's amount and paid flag.
///
/// PUT /invoices/{id} UpdateInvoiceRequest
///
/// Paying an unpaid invoice stamps `paid_date` with the store's current
/// date, unpaying clears it, and leaving `paid` unchanged keeps it.
///
/// # Returns
///
/// - `200 OK` with `{invoice: {...}}`
/// - `404 Not Found` - No invoice has this id, whatever the body
/// - `500 Internal Server Error` - Unusable body or database error
#[instrument(skip_all, fields(id = %id, request_id = %uuid::Uuid::new_v4()))]
pub async fn update_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<ValidatedJson<UpdateInvoiceRequest>, AppError>,
) -> AppResult<Json<InvoiceResponse>> {
    let id = parse_invoice_id(&id)?;

    let payload = match payload {
        Ok(ValidatedJson(payload)) => payload,
        Err(rejection) => {
            let exists = Invoice::exists(&state.db_pool, id)
                .await
                .or_internal(UPDATE_FAILED)?;
            if !exists {
                warn!("Invoice to update not found");
                return Err(AppError::NotFound(INVOICE_NOT_FOUND));
            }
            return Err(rejection.reclassify(UPDATE_FAILED));
        }
    };

    let updated = Invoice::update_payment(&state.db_pool, id, payload.amt, payload.paid)
        .await
        .or_internal(UPDATE_FAILED)?;

    match updated {
        Some(invoice) => {
            info!(paid = invoice.paid, "Invoice updated");
            Ok(Json(InvoiceResponse { invoice }))
        }
        None => {
            warn!("Invoice to update not found");
            Err(AppError::NotFound(INVOICE_NOT_FOUND))
        }
    }
}

/// Deletes an invoice.
///
/// DELETE /invoices/{id}
///
/// # Returns
///
/// - `200 OK` with `{status: "deleted"}`
/// - `404 Not Found` - No invoice has this id
/// - `500 Internal Server Error` - Database error
#[instrument(skip_all, fields(id = %id, request_id = %uuid::Uuid::new_v4()))]
pub async fn delete_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let id = parse_invoice_id(&id)?;

    let deleted = Invoice::delete(&state.db_pool, id)
        .await
        .or_internal("Could not delete invoice")?;

    if deleted.is_none() {
        warn!("Invoice to delete not found");
        return Err(AppError::NotFound(INVOICE_NOT_FOUND));
    }

    info!("Invoice deleted");
    Ok(Json(StatusResponse::deleted()))
}
