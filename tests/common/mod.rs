//! Shared utilities for integration testing.

use std::net::SocketAddr;

use paceconverter::config::AppConfig;
use paceconverter::http::HttpServer;
use paceconverter::lifecycle::Shutdown;
use paceconverter::net::Listener;

/// A config suitable for tests: ephemeral loopback port, no metrics
/// exporter, no self-probe, quiet logs.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.observability.metrics_enabled = false;
    config.observability.access_log = false;
    config.health_check.enabled = false;
    config.mode.production = false;
    config
}

/// Boot a service on an ephemeral port. Returns the bound address and the
/// shutdown handle.
pub async fn spawn_service(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.clone();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
