//! Startup preflight checks.
//!
//! # Responsibilities
//! - Surface deployment mistakes before the listener binds
//! - Log the effective runtime mode
//!
//! # Design Decisions
//! - Checks warn rather than abort: a missing asset directory degrades the
//!   page but does not make conversions unavailable

use std::net::SocketAddr;
use std::path::Path;

use crate::config::AppConfig;

/// Run preflight checks against the validated configuration.
pub fn preflight(config: &AppConfig) {
    tracing::info!(
        production = config.mode.production,
        debug = config.mode.debug,
        "Runtime mode"
    );

    if let Ok(addr) = config.listener.bind_address.parse::<SocketAddr>() {
        // Binding below 1024 needs elevated privileges; this service is meant
        // to run as an unprivileged account behind the deployment layer.
        if addr.port() < 1024 {
            tracing::warn!(
                port = addr.port(),
                "Privileged port requested; run behind a proxy on an unprivileged port instead"
            );
        }
    }

    for (label, dir) in [
        ("js", config.assets.js_dir.as_str()),
        ("css", config.assets.css_dir.as_str()),
    ] {
        if !Path::new(dir).is_dir() {
            tracing::warn!(kind = label, directory = dir, "Asset directory missing");
        }
    }
}
