//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) config file works.

use serde::{Deserialize, Serialize};

/// Root configuration for the pace converter service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Worker pool configuration.
    pub workers: WorkerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Liveness probe settings.
    pub health_check: HealthCheckConfig,

    /// Static asset directories.
    pub assets: AssetConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Runtime mode flags.
    pub mode: ModeConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Maximum concurrent connections across all workers (backpressure).
    pub max_connections: usize,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            max_connections: 2048,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Worker pool configuration.
///
/// Models the classic pre-fork process manager knobs: a fixed worker count,
/// per-worker request concurrency, and voluntary recycling after a jittered
/// request-count ceiling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of worker tasks sharing the listener.
    pub count: usize,

    /// Concurrent requests each worker will handle.
    pub threads: usize,

    /// Requests a worker handles before it is recycled.
    pub max_requests: u64,

    /// Jitter applied to `max_requests` so workers do not restart in lockstep.
    pub max_requests_jitter: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: 4,
            threads: 2,
            max_requests: 1000,
            max_requests_jitter: 100,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Keep-alive window: how long an idle connection may wait for its next
    /// request before being closed, in seconds.
    pub keepalive_secs: u64,

    /// Extra time granted to a retiring worker to drain in-flight requests,
    /// in seconds.
    pub drain_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 60,
            keepalive_secs: 5,
            drain_grace_secs: 5,
        }
    }
}

/// Liveness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Enable the liveness self-probe.
    pub enabled: bool,

    /// Probe interval in seconds.
    pub interval_secs: u64,

    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,

    /// Startup grace period before the first probe counts, in seconds.
    pub grace_period_secs: u64,

    /// Number of consecutive failures before marking unhealthy.
    pub failure_threshold: u32,

    /// Path to probe.
    pub path: String,

    /// Shut the process down once unhealthy, so an external supervisor can
    /// restart it.
    pub exit_on_unhealthy: bool,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
            timeout_secs: 10,
            grace_period_secs: 5,
            failure_threshold: 3,
            path: "/".to_string(),
            exit_on_unhealthy: false,
        }
    }
}

/// Static asset directories served under `/js` and `/css`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory served under `/js`.
    pub js_dir: String,

    /// Directory served under `/css`.
    pub css_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            js_dir: "assets/js".to_string(),
            css_dir: "assets/css".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit one access-log line per request.
    pub access_log: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            access_log: true,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Runtime mode flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Production mode: JSON logs, stricter validation.
    pub production: bool,

    /// Debug mode. Must be off when `production` is on.
    pub debug: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            production: true,
            debug: false,
        }
    }
}
