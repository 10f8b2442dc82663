use std::process::ExitCode;

use axum::{ServiceExt, extract::Request};
use biztime::config::{AppEnv, ConfigError, Settings};
use biztime::{app, db, telemetry};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Error, Debug)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database: {0}")]
    Db(#[from] sqlx::Error),

    #[error("migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    let app_env = settings
        .as_ref()
        .map(|s| s.app_env)
        .unwrap_or(AppEnv::Development);
    telemetry::init_subscriber(app_env);

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Result<Settings, ConfigError>) -> Result<(), StartupError> {
    let settings = settings?;

    let db_pool = db::connect(&settings).await?;
    if settings.run_migrations {
        db::migrate(&db_pool).await?;
    }

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "Server running");

    let service = ServiceExt::<Request>::into_make_service(app(db_pool));
    axum::serve(listener, service).await?;
    Ok(())
}
