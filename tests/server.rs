//! Integration tests for the HTTP server, health endpoint, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use erase_proxy::cmd::run::build_state;
use erase_proxy::config::{ConfigVersion, LoadedConfig};
use erase_proxy::health::HealthResponse;
use erase_proxy::server;

fn test_config() -> LoadedConfig {
    let mut loaded = LoadedConfig::defaults();
    loaded.config.server.path = "/erase".into();
    loaded.config.downstream.url = "http://localhost:19999/upload".into();
    loaded.version = ConfigVersion::Hash("abcdef1234567890".into());
    loaded.source_name = "test".into();
    loaded
}

async fn start_test_server() -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(build_state(test_config()).unwrap());
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await
        .unwrap();
    });

    (addr, shutdown_tx)
}

#[tokio::test]
async fn health_endpoint_returns_healthy() {
    let (addr, shutdown) = start_test_server().await;

    let url = format!("http://{addr}/health");
    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status(), 200);

    let health: HealthResponse = resp.json().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.config.source, "test");
    assert_eq!(health.config.version, "abcdef12");
    assert_eq!(health.config.path, "/erase");
    assert_eq!(health.config.downstream, "http://localhost:19999/upload");
    assert_eq!(health.config.timeout_ms, Some(30_000));
    assert_eq!(health.stats.requests_relayed, 0);
    assert_eq!(health.stats.requests_fallback, 0);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn health_version_matches_crate() {
    let (addr, shutdown) = start_test_server().await;

    let url = format!("http://{addr}/health");
    let health: HealthResponse = reqwest::get(&url).await.unwrap().json().await.unwrap();
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn erase_route_follows_config() {
    let (addr, shutdown) = start_test_server().await;

    let client = reqwest::Client::new();
    let default_path = client
        .post(format!("http://{addr}/api/erase"))
        .json(&serde_json::json!("image"))
        .send()
        .await
        .unwrap();
    assert_eq!(default_path.status(), 404);

    let configured = client
        .post(format!("http://{addr}/erase"))
        .json(&serde_json::json!("image"))
        .send()
        .await
        .unwrap();
    assert_eq!(configured.status(), 200);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn get_on_erase_route_is_not_allowed() {
    let (addr, shutdown) = start_test_server().await;

    let resp = reqwest::get(format!("http://{addr}/erase")).await.unwrap();
    assert_eq!(resp.status(), 405);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn graceful_shutdown_works() {
    let (addr, shutdown) = start_test_server().await;

    // Verify server is running
    let url = format!("http://{addr}/health");
    assert!(reqwest::get(&url).await.is_ok());

    // Send shutdown
    let _ = shutdown.send(());

    // Give it a moment to shut down
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // Server should no longer accept connections
    let result = reqwest::get(&url).await;
    assert!(result.is_err());
}
