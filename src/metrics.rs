//! Metrics for the item services and the exerciser.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding process installs a recorder.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use tracing::debug;

/// Items accepted counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Items rejected counter metric name.
pub const METRIC_ITEMS_REJECTED: &str = "items_rejected_total";
/// Collection size gauge metric name.
pub const METRIC_ITEMS_STORED: &str = "items_stored";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items appended");
    describe_counter!(
        METRIC_ITEMS_REJECTED,
        "Total number of POST bodies rejected as invalid items"
    );
    describe_gauge!(METRIC_ITEMS_STORED, "Current size of the item collection");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Record an accepted item and the resulting collection size.
pub fn record_item_created(stored: usize) {
    counter!(METRIC_ITEMS_CREATED).increment(1);
    gauge!(METRIC_ITEMS_STORED).set(stored as f64);
}

/// Increment the rejected items counter.
pub fn inc_items_rejected() {
    counter!(METRIC_ITEMS_REJECTED).increment(1);
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}
