//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with SLO-aligned histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Objexis metrics
pub const METRICS_PREFIX: &str = "objexis";

/// SLO-aligned histogram buckets for request latency (in seconds)
/// Targets: P50 < 5ms, P99 < 25ms
pub const LATENCY_BUCKETS: &[f64] = &[
    0.0005, // 0.5ms
    0.001,  // 1ms
    0.0025, // 2.5ms
    0.005,  // 5ms - P50 target
    0.010,  // 10ms
    0.025,  // 25ms - P99 target
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Agent metrics
    describe_counter!(
        format!("{}_agent_replies_total", METRICS_PREFIX),
        Unit::Count,
        "Total agent replies by intent"
    );

    describe_counter!(
        format!("{}_agent_fallback_total", METRICS_PREFIX),
        Unit::Count,
        "Replies built from the fallback knowledge context"
    );

    describe_histogram!(
        format!("{}_agent_sources_count", METRICS_PREFIX),
        Unit::Count,
        "Number of sources attached to each reply"
    );

    describe_counter!(
        format!("{}_agent_failures_total", METRICS_PREFIX),
        Unit::Count,
        "Agent requests that ended in an error"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Seconds since tracking started
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.elapsed_secs();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a synthesized agent reply
pub fn record_agent_reply(intent: &str, source_count: usize, fallback: bool) {
    counter!(
        format!("{}_agent_replies_total", METRICS_PREFIX),
        "intent" => intent.to_string()
    )
    .increment(1);

    if fallback {
        counter!(format!("{}_agent_fallback_total", METRICS_PREFIX)).increment(1);
    }

    histogram!(
        format!("{}_agent_sources_count", METRICS_PREFIX),
        "intent" => intent.to_string()
    )
    .record(source_count as f64);
}

/// Helper to record a failed agent request
pub fn record_agent_failure(code: &str) {
    counter!(
        format!("{}_agent_failures_total", METRICS_PREFIX),
        "code" => code.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets() {
        // Verify buckets are sorted and contain SLO targets
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }

        assert!(LATENCY_BUCKETS.contains(&0.005));
        assert!(LATENCY_BUCKETS.contains(&0.025));
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("POST", "/api/agent");
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(metrics.elapsed_secs() > 0.0);
        metrics.finish(200);
    }

    #[test]
    fn test_agent_recorders_without_exporter() {
        // No recorder installed: calls are no-ops and must not panic
        record_agent_reply("concept", 3, false);
        record_agent_reply("default", 2, true);
        record_agent_failure("INTERNAL_ERROR");
    }
}
