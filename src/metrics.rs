//! Prometheus metrics for calculation outcomes and latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::arbitrage::OutcomeKind;
use crate::error::Result;

// === Metric Name Constants ===

/// Calculations counter metric name, labelled by outcome.
pub const METRIC_CALCULATIONS: &str = "calculations_total";
/// Calculation latency metric name.
pub const METRIC_CALCULATION_LATENCY: &str = "calculation_latency_ms";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Install the Prometheus recorder and register metric descriptions.
///
/// Call once at startup; the returned handle renders the scrape output.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_CALCULATIONS,
        "Total number of calculations by outcome"
    );
    describe_histogram!(
        METRIC_CALCULATION_LATENCY,
        "Time to validate and compute an allocation in milliseconds"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the calculations counter for an outcome.
pub fn inc_calculations(kind: OutcomeKind) {
    let label: &'static str = kind.into();
    counter!(METRIC_CALCULATIONS, "outcome" => label).increment(1);
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for one calculation.
pub fn timer_calculation() -> LatencyTimer {
    LatencyTimer::new(METRIC_CALCULATION_LATENCY)
}
