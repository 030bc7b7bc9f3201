//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bridge_requests_total` (counter): inbound requests by route, status
//! - `bridge_request_duration_seconds` (histogram): inbound latency by route
//! - `bridge_upstream_requests_total` (counter): upstream calls by status
//! - `bridge_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until a recorder is installed, so handlers and
//! tests never depend on the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one inbound request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    counter!(
        "bridge_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("bridge_request_duration_seconds", "route" => route.to_string()).record(elapsed);
}

/// Record one upstream call; `status` is the HTTP status or `"error"`.
pub fn record_upstream(status: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    counter!("bridge_upstream_requests_total", "status" => status.to_string()).increment(1);
    histogram!("bridge_upstream_duration_seconds").record(elapsed);
}
