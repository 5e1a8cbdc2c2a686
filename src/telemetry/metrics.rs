//! Prometheus metrics setup and metric definitions

use crate::error::{AppError, Result};
use anyhow::Context;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Prometheus defaults plus sub-millisecond buckets for fast endpoints.
    let buckets = vec![
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    PrometheusBuilder::new()
        .set_buckets(&buckets)
        .context("failed to set histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")
}

/// Register metric descriptions and emit initial zero values so Prometheus output
/// includes HELP/TYPE lines for all metrics from startup.
pub fn describe_metrics() {
    // HTTP metrics
    describe_counter!(
        "entity_app_http_requests_total",
        "Total number of HTTP requests"
    );
    describe_histogram!(
        "entity_app_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "entity_app_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    // Entity metrics
    describe_counter!(
        "entity_app_entity_operations_total",
        "Total EntityWithPagination operations by outcome"
    );

    gauge!("entity_app_http_requests_in_flight").set(0.0);
    for operation in ["create", "list", "get", "update", "delete"] {
        counter!("entity_app_entity_operations_total", "operation" => operation, "outcome" => "success")
            .absolute(0);
    }
    histogram!("entity_app_http_request_duration_seconds", "method" => "GET", "path" => "/health")
        .record(0.0);
}

/// Count one entity operation and hand the result back unchanged.
pub fn observe_entity_operation<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(AppError::NotFound(_)) => "not_found",
        Err(AppError::InvalidRequest { .. })
        | Err(AppError::BadRequest(_))
        | Err(AppError::Validation(_)) => "rejected",
        Err(_) => "error",
    };
    counter!("entity_app_entity_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    result
}
