//! Liveness self-probe.
//!
//! # Responsibilities
//! - Periodically issue a plain GET to the service root
//! - Update the shared liveness state from the results

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::sync::broadcast;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::state::LivenessState;
use crate::lifecycle::Shutdown;

pub struct HealthMonitor {
    target: SocketAddr,
    config: HealthCheckConfig,
    state: Arc<LivenessState>,
    shutdown: Shutdown,
    client: Client<HttpConnector, Body>,
}

impl HealthMonitor {
    pub fn new(
        listen_addr: SocketAddr,
        config: HealthCheckConfig,
        state: Arc<LivenessState>,
        shutdown: Shutdown,
    ) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        // A wildcard bind address is not routable; probe loopback instead.
        let target = if listen_addr.ip().is_unspecified() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), listen_addr.port())
        } else {
            listen_addr
        };

        Self {
            target,
            config,
            state,
            shutdown,
            client,
        }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if self.shutdown.is_triggered() {
            return;
        }

        tracing::info!(
            target = %self.target,
            interval = self.config.interval_secs,
            path = %self.config.path,
            "Liveness probe starting"
        );

        let grace = Duration::from_secs(self.config.grace_period_secs);
        tokio::select! {
            _ = time::sleep(grace) => {}
            _ = shutdown.recv() => return,
        }

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.probe_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Liveness probe received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    async fn probe_once(&self) {
        let uri = format!("http://{}{}", self.target, self.config.path);

        let request = match Request::builder()
            .method("GET")
            .uri(uri)
            .header("user-agent", "paceconverter-liveness-probe")
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build probe request");
                return;
            }
        };

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let healthy = match time::timeout(timeout, self.client.request(request)).await {
            Ok(Ok(response)) => {
                let success = response.status().is_success();
                if !success {
                    tracing::warn!(status = %response.status(), "Probe failed: non-success status");
                }
                success
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Probe failed: connection error");
                false
            }
            Err(_) => {
                tracing::warn!("Probe failed: timeout");
                false
            }
        };

        if healthy {
            self.state.record_success();
        } else if self.state.record_failure() && self.config.exit_on_unhealthy {
            tracing::error!("Service unhealthy, triggering shutdown for supervisor restart");
            self.shutdown.trigger();
        }
    }
}
