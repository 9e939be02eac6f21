//! Metrics and observability utilities
//!
//! Records classification and loading metrics through the `metrics` facade.
//! Nothing is exported unless the host process installs a recorder.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

use crate::graph::Role;

/// Metrics prefix for all SAP metrics
pub const METRICS_PREFIX: &str = "sap";

/// Register all metric descriptions
pub fn register_metrics() {
    // Loader metrics
    describe_counter!(
        format!("{}_sources_loaded_total", METRICS_PREFIX),
        Unit::Count,
        "Total input sources turned into graphs"
    );

    describe_gauge!(
        format!("{}_graph_papers", METRICS_PREFIX),
        Unit::Count,
        "Papers in the most recently loaded graph"
    );

    describe_gauge!(
        format!("{}_graph_citations", METRICS_PREFIX),
        Unit::Count,
        "Citations in the most recently loaded graph"
    );

    // Classifier metrics
    describe_counter!(
        format!("{}_graphs_classified_total", METRICS_PREFIX),
        Unit::Count,
        "Total graphs classified"
    );

    describe_histogram!(
        format!("{}_classify_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Classification latency in seconds"
    );

    describe_gauge!(
        format!("{}_selected_members", METRICS_PREFIX),
        Unit::Count,
        "Members selected per role in the most recent classification"
    );

    describe_counter!(
        format!("{}_classify_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total graphs rejected by the classifier"
    );

    tracing::debug!("Metrics registered");
}

/// Helper to time one classification
pub struct ClassifyMetrics {
    start: Instant,
}

impl ClassifyMetrics {
    /// Start tracking a classification
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Record a successful classification and its role sizes
    pub fn finish(self, roots: usize, trunk: usize, leaves: usize) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(format!("{}_graphs_classified_total", METRICS_PREFIX)).increment(1);
        histogram!(format!("{}_classify_duration_seconds", METRICS_PREFIX)).record(duration);

        for (role, size) in [(Role::Root, roots), (Role::Trunk, trunk), (Role::Leaf, leaves)] {
            gauge!(
                format!("{}_selected_members", METRICS_PREFIX),
                "role" => role.as_str()
            )
            .set(size as f64);
        }
    }

    /// Record a rejected graph
    pub fn fail(self, code: u16) {
        counter!(
            format!("{}_classify_errors_total", METRICS_PREFIX),
            "code" => code.to_string()
        )
        .increment(1);
    }
}

/// Helper to record loader metrics
pub fn record_graph_loaded(papers: usize, citations: usize) {
    counter!(format!("{}_sources_loaded_total", METRICS_PREFIX)).increment(1);
    gauge!(format!("{}_graph_papers", METRICS_PREFIX)).set(papers as f64);
    gauge!(format!("{}_graph_citations", METRICS_PREFIX)).set(citations as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_metrics() {
        register_metrics();
        let metrics = ClassifyMetrics::start();
        metrics.finish(3, 10, 5);
        ClassifyMetrics::start().fail(1001);
        record_graph_loaded(42, 80);
        // Just verify it runs without panic
    }
}
