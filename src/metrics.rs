// src/metrics.rs
use anyhow::{Context, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use shuttle_axum::axum::{routing::get, Router};

pub const REQUESTS_TOTAL: &str = "insight_requests_total";
pub const ERRORS_TOTAL: &str = "insight_errors_total";
pub const ANALYZE_MS: &str = "insight_analyze_ms";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        metrics::describe_counter!(REQUESTS_TOTAL, "API requests by endpoint");
        metrics::describe_counter!(ERRORS_TOTAL, "Failed API requests by error kind");
        metrics::describe_histogram!(ANALYZE_MS, "Core analysis time in milliseconds");
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
