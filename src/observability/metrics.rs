//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pace_requests_total` (counter): handled requests by method, status
//! - `pace_request_duration_seconds` (histogram): latency distribution
//! - `pace_workers_recycled_total` (counter): voluntary worker retirements
//! - `pace_worker_count` (gauge): workers currently running
//! - `pace_healthy` (gauge): 1=healthy, 0=unhealthy

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and describe the metric families.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter");
            return;
        }
    }

    describe_counter!("pace_requests_total", "Handled requests by method and status");
    describe_histogram!(
        "pace_request_duration_seconds",
        "Request latency distribution"
    );
    describe_counter!(
        "pace_workers_recycled_total",
        "Workers retired after reaching their request ceiling"
    );
    describe_gauge!("pace_worker_count", "Workers currently running");
    describe_gauge!("pace_healthy", "Liveness probe verdict (1 healthy, 0 unhealthy)");
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    counter!("pace_requests_total", &labels).increment(1);
    histogram!("pace_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record one worker recycle.
pub fn record_worker_recycled() {
    counter!("pace_workers_recycled_total").increment(1);
}

/// Record the current worker count.
pub fn record_worker_count(count: usize) {
    gauge!("pace_worker_count").set(count as f64);
}

/// Record the liveness verdict.
pub fn record_health(healthy: bool) {
    gauge!("pace_healthy").set(if healthy { 1.0 } else { 0.0 });
}
