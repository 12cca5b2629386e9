//! Metrics collection and exposition.
//!
//! # Metrics
//! - `compressor_requests_total` (counter): requests by endpoint, status
//! - `compressor_request_duration_seconds` (histogram): latency by endpoint
//! - `compressor_input_bytes` (histogram): submitted code size by endpoint
//! - `compressor_output_bytes` (histogram): produced output size by endpoint
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(endpoint: &'static str, status: u16, start: Instant) {
    counter!(
        "compressor_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!("compressor_request_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record input and output sizes of a successful transform.
pub fn record_sizes(endpoint: &'static str, input: usize, output: usize) {
    histogram!("compressor_input_bytes", "endpoint" => endpoint).record(input as f64);
    histogram!("compressor_output_bytes", "endpoint" => endpoint).record(output as f64);
}
