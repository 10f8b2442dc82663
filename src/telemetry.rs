//! # Telemetry
//!
//! Installs the global tracing subscriber. Production emits bunyan-style
//! JSON lines; every other environment gets the human-readable formatter.
//! `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppEnv;
use crate::utils::constant::{DEFAULT_LOG_FILTER, SERVICE_NAME};

/// Installs the subscriber for `app_env`. Must be called at most once.
pub fn init_subscriber(app_env: AppEnv) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    match app_env {
        AppEnv::Production => registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                SERVICE_NAME.to_owned(),
                std::io::stdout,
            ))
            .init(),
        AppEnv::Development => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
