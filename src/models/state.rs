use sqlx::PgPool;
use tracing::info;

/// Application state shared across requests.
///
/// Holds the store handle every handler receives through axum's `State`
/// extractor; nothing else outlives a request.
pub struct AppState {
    /// The PostgreSQL connection pool.
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(db_pool: PgPool) -> Self {
        info!("Initializing application state");
        Self { db_pool }
    }
}
