#![allow(dead_code)]

use std::sync::Once;

use axum::{ServiceExt, extract::Request};
use sqlx::PgPool;
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("biztime=debug")
            .with_test_writer()
            .init();
    });
}

/// Spawns the application on a random port and returns its address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(test_db_pool: PgPool) -> String {
    init_tracing_once();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let service = ServiceExt::<Request>::into_make_service(biztime::app(test_db_pool));
        axum::serve(listener, service).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

/// Spawns the application over a pool that never connects.
///
/// For routes that must answer without touching the store.
pub async fn spawn_app_without_db() -> String {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://biztime@127.0.0.1:1/biztime")
        .expect("Failed to build lazy pool");
    spawn_app(pool).await
}
