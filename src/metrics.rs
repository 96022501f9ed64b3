//! Prometheus metrics for store activity and request latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Cars created counter metric name.
pub const METRIC_CARS_CREATED: &str = "cars_created_total";
/// Cars updated counter metric name.
pub const METRIC_CARS_UPDATED: &str = "cars_updated_total";
/// Store errors counter metric name.
pub const METRIC_STORE_ERRORS: &str = "store_errors_total";

/// Install the global Prometheus recorder and register descriptions.
///
/// Call this once at startup. The returned handle renders the exposition
/// text served at `/metrics`.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_CARS_CREATED, "Total number of cars created");
    describe_counter!(METRIC_CARS_UPDATED, "Total number of cars updated");
    describe_counter!(
        METRIC_STORE_ERRORS,
        "Total number of store operations rejected"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, method: &str, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .record(latency_ms);
}

/// Increment cars created counter.
pub fn inc_cars_created() {
    counter!(METRIC_CARS_CREATED).increment(1);
}

/// Increment cars updated counter.
pub fn inc_cars_updated() {
    counter!(METRIC_CARS_UPDATED).increment(1);
}

/// Increment store errors counter.
pub fn inc_store_errors(kind: &'static str) {
    counter!(METRIC_STORE_ERRORS, "kind" => kind).increment(1);
}
