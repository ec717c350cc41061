//! Metrics collection and exposition.
//!
//! # Metrics
//! - `provisioner_requests_total` (counter): requests by endpoint, status
//! - `provisioner_rate_limited_total` (counter): fixed-window rejections

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

/// Count a served request.
pub fn record_request(endpoint: &str, status: u16) {
    metrics::counter!(
        "provisioner_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Count a rate-limited rejection.
pub fn record_rate_limited() {
    metrics::counter!("provisioner_rate_limited_total").increment(1);
}
