//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (timeout, body limit, access log, request ID)
//! - Spawn the liveness self-probe
//! - Hand the router to the worker pool for serving

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::health::monitor::HealthMonitor;
use crate::health::state::LivenessState;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::Shutdown;
use crate::net::Listener;
use crate::observability::access_log::access_log_middleware;
use crate::worker::WorkerPool;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub liveness: Arc<LivenessState>,
}

/// HTTP server for the pace converter.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    liveness: Arc<LivenessState>,
    recycle: broadcast::Sender<()>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let liveness = Arc::new(LivenessState::new(config.health_check.failure_threshold));
        let state = AppState {
            liveness: liveness.clone(),
        };

        let router = Self::build_router(&config, state);
        let (recycle, _) = broadcast::channel(1);

        Self {
            router,
            config,
            liveness,
            recycle,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::index).post(handlers::convert))
            .route("/health", get(handlers::health))
            .route("/api/convert", get(handlers::api_convert))
            .route("/api/races", get(handlers::api_races))
            .nest_service("/js", ServeDir::new(&config.assets.js_dir))
            .nest_service("/css", ServeDir::new(&config.assets.css_dir))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(middleware::from_fn_with_state(
                config.observability.clone(),
                access_log_middleware,
            ))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Handle for requesting a rolling worker recycle (SIGHUP).
    pub fn recycle_handle(&self) -> broadcast::Sender<()> {
        self.recycle.clone()
    }

    /// The shared liveness state backing `/health`.
    pub fn liveness(&self) -> Arc<LivenessState> {
        self.liveness.clone()
    }

    /// Run the server on the given listener until shutdown completes.
    pub async fn run(self, listener: Listener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            workers = self.config.workers.count,
            threads = self.config.workers.threads,
            "HTTP server starting"
        );

        if self.config.health_check.enabled {
            let monitor = HealthMonitor::new(
                addr,
                self.config.health_check.clone(),
                self.liveness.clone(),
                shutdown.clone(),
            );
            let probe_shutdown = shutdown.subscribe();
            tokio::spawn(async move {
                monitor.run(probe_shutdown).await;
            });
        }

        let pool = WorkerPool::new(
            self.config.workers.clone(),
            self.config.timeouts.clone(),
            self.router,
            self.recycle.clone(),
        );
        pool.run(Arc::new(listener), shutdown).await;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
