//! Pace Converter Service
//!
//! A small production HTTP service converting running paces between min/km
//! and km/h and projecting race finish times.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────┐
//!                     │                 PACE CONVERTER                 │
//!                     │                                                │
//!  Client Request     │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!  ───────────────────┼─▶│   net   │──▶│  worker  │──▶│    http    │  │
//!                     │  │listener │   │   pool   │   │  handlers  │  │
//!                     │  └─────────┘   └──────────┘   └─────┬──────┘  │
//!                     │                                     │         │
//!                     │                                     ▼         │
//!  Client Response    │                               ┌────────────┐  │
//!  ◀──────────────────┼───────────────────────────────│    pace    │  │
//!                     │                               │ conversion │  │
//!                     │                               └────────────┘  │
//!                     │                                                │
//!                     │  ┌──────────────────────────────────────────┐ │
//!                     │  │           Cross-Cutting Concerns         │ │
//!                     │  │  ┌────────┐ ┌────────┐ ┌──────────────┐  │ │
//!                     │  │  │ config │ │ health │ │observability │  │ │
//!                     │  │  └────────┘ └────────┘ └──────────────┘  │ │
//!                     │  │  ┌──────────────────────────────────┐    │ │
//!                     │  │  │  lifecycle: startup / signals /  │    │ │
//!                     │  │  │        graceful shutdown         │    │ │
//!                     │  │  └──────────────────────────────────┘    │ │
//!                     │  └──────────────────────────────────────────┘ │
//!                     └────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use paceconverter::config::loader;
use paceconverter::http::HttpServer;
use paceconverter::lifecycle::{signals, startup, Shutdown};
use paceconverter::net::Listener;
use paceconverter::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path as the sole argument.
    let config = match std::env::args().nth(1) {
        Some(path) => loader::load_config(Path::new(&path))?,
        None => loader::load_defaults()?,
    };

    logging::init(&config.observability, config.mode.production);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        workers = config.workers.count,
        threads = config.workers.threads,
        max_requests = config.workers.max_requests,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::preflight(&config);

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);

    tokio::spawn(signals::run(shutdown.clone(), server.recycle_handle()));

    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
