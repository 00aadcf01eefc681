//! Per-request access logging and request metrics.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::config::ObservabilityConfig;
use crate::http::request::RequestId;
use crate::observability::metrics;

/// Middleware recording one access-log line and the request metrics.
///
/// Field set follows the classic process-manager access log: client address,
/// request line, status, response bytes, referer, user agent and latency in
/// microseconds. The subscriber supplies the timestamp.
pub async fn access_log_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(config): State<ObservabilityConfig>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let request_line = format!(
        "{} {} {:?}",
        method,
        request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/"),
        request.version()
    );
    let referer = header_or_dash(&request, header::REFERER);
    let user_agent = header_or_dash(&request, header::USER_AGENT);
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let bytes = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    metrics::record_request(method.as_str(), status, start);

    if config.access_log {
        tracing::info!(
            target: "paceconverter::access",
            client = %addr,
            request_id = %request_id,
            request = %request_line,
            status = status,
            bytes = %bytes,
            referer = %referer,
            user_agent = %user_agent,
            duration_us = start.elapsed().as_micros() as u64,
            "request handled"
        );
    }

    response
}

fn header_or_dash(request: &Request<Body>, name: header::HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
