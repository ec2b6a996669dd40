// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Metrics instrumentation for sphinx-search.
//!
//! Uses the `metrics` crate for backend-agnostic metrics collection.
//! The host application is responsible for choosing the exporter.
//!
//! # Metric Naming Convention
//! - `sphinx_search_` prefix for all metrics
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Labels
//! - `status`: success, error
//! - `kind`: no_queries, engine, connection

use metrics::{counter, histogram};
use std::time::Duration;

/// Record an executed batch and how many queries it carried
pub fn record_search_batch(queries: usize, status: &str) {
    counter!(
        "sphinx_search_batches_total",
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("sphinx_search_batch_queries").record(queries as f64);
}

/// Record round trip latency of a batch
pub fn record_search_latency(duration: Duration) {
    histogram!("sphinx_search_batch_seconds").record(duration.as_secs_f64());
}

/// Record a failed search
pub fn record_search_error(kind: &str) {
    counter!(
        "sphinx_search_errors_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

/// Record a connection being opened for a batch
pub fn record_connection(status: &str) {
    counter!(
        "sphinx_search_connections_total",
        "status" => status.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    // These verify the calls are safe without an installed recorder.

    #[test]
    fn test_record_batch() {
        record_search_batch(3, "success");
        record_search_batch(1, "error");
        record_search_latency(Duration::from_millis(12));
    }

    #[test]
    fn test_record_errors_and_connections() {
        record_search_error("engine");
        record_search_error("no_queries");
        record_connection("success");
        record_connection("error");
    }
}
