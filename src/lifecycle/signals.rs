//! OS signal handling.
//!
//! # Responsibilities
//! - SIGTERM / SIGINT: trigger graceful shutdown
//! - SIGHUP: rolling worker recycle, keeping the listener open
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP recycles workers rather than reloading config: the config file
//!   is immutable for the process lifetime

use tokio::sync::broadcast;

use crate::lifecycle::Shutdown;

/// Listen for process signals until a shutdown-triggering one arrives.
#[cfg(unix)]
pub async fn run(shutdown: Shutdown, recycle: broadcast::Sender<()>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            return;
        }
    };
    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGHUP handler");
            return;
        }
    };

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("SIGINT received, shutting down");
                shutdown.trigger();
                return;
            }
            _ = sigterm.recv() => {
                tracing::info!("SIGTERM received, shutting down");
                shutdown.trigger();
                return;
            }
            _ = sighup.recv() => {
                tracing::info!("SIGHUP received, recycling workers");
                let _ = recycle.send(());
            }
        }
    }
}

/// Fallback for non-unix targets: Ctrl+C only.
#[cfg(not(unix))]
pub async fn run(shutdown: Shutdown, _recycle: broadcast::Sender<()>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Interrupt received, shutting down");
        shutdown.trigger();
    }
}
