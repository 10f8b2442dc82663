//! # Store Connection
//!
//! Opens the PostgreSQL pool shared by every request and applies the schema
//! in `migrations/`.

use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use tracing::{info, instrument};

use crate::config::Settings;
use crate::utils::constant::DB_MAX_CONNECTIONS;

/// Connects to the database named by `settings`.
#[instrument(skip_all)]
pub async fn connect(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(DB_MAX_CONNECTIONS)
        .connect(&settings.database_url)
        .await?;

    info!("Successfully connected to the database");
    Ok(pool)
}

/// Applies any pending migrations.
#[instrument(skip_all)]
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
