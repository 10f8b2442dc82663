//! # BizTime - Companies, Invoices and Industries API
//!
//! ## Modules
//!
//! - [`handlers`] - HTTP request handlers for each resource
//! - [`models`] - Store records and the queries that read and write them
//! - [`error`] - The error type and its JSON envelope
//! - [`config`] - Settings read from the environment
//! - [`telemetry`] - Tracing subscriber setup
//! - [`utils`] - Constants and small helpers

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};

use crate::handlers::{
    associate_industry, create_company, create_industry, create_invoice, delete_company,
    delete_invoice, get_company, get_invoice, health_check, list_companies, list_industries,
    list_invoices, not_found, update_company, update_invoice,
};
use crate::models::AppState;

/// Creates the application service: [`router`] behind trailing-slash
/// normalization, so `/companies/` is served as `/companies`.
///
/// Serve it with `axum::ServiceExt::<axum::extract::Request>::into_make_service`.
pub fn app(db_pool: PgPool) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router(db_pool))
}

/// Creates an Axum router with application routes and state.
///
/// # Arguments
///
/// * `db_pool` - PostgreSQL connection pool every handler queries through
///
/// # Returns
///
/// A configured Axum router. Requests that match no route, by path or by
/// method, are answered with the 404 error envelope.
pub fn router(db_pool: PgPool) -> Router {
    let state = Arc::new(AppState::new(db_pool));

    let company_routes = Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/{code}",
            get(get_company).put(update_company).delete(delete_company),
        );

    let invoice_routes = Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        );

    let industry_routes = Router::new()
        .route("/industries", get(list_industries).post(create_industry))
        .route("/industries/associate", post(associate_industry));

    Router::new()
        .route("/health-check", get(health_check))
        .merge(company_routes)
        .merge(invoice_routes)
        .merge(industry_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
