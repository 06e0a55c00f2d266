//! Metrics collection and exposition.
//!
//! # Metrics
//! - `echo_requests_total` (counter): requests by endpoint, method, status
//! - `echo_request_duration_seconds` (histogram): latency by endpoint
//! - `echo_simulated_delay_seconds` (histogram): effective simulated delays
//! - `echo_health_status` (gauge): 1=serving, 0=otherwise, per service

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::ServingStatus;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(endpoint: &str, method: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "echo_requests_total",
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("echo_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_simulated_delay(secs: u64) {
    ::metrics::histogram!("echo_simulated_delay_seconds").record(secs as f64);
}

pub fn record_health_status(service: &str, status: ServingStatus) {
    let value = if status == ServingStatus::Serving { 1.0 } else { 0.0 };
    ::metrics::gauge!("echo_health_status", "service" => service.to_string()).set(value);
}

/// Route-level middleware recording request count and latency.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    record_request(&endpoint, &method, response.status().as_u16(), start);
    response
}
