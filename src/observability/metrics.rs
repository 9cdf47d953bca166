//! # Metrics Collection
//!
//! Remediation and HTTP metrics through the `metrics` facade. Until
//! [`init_metrics`] installs the Prometheus exporter every call is a no-op.

use ::tracing::{info, warn};
use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Install the Prometheus HTTP exporter and describe the service metrics.
pub fn init_metrics(config: &ObservabilityConfig) -> Result<()> {
    if !config.enable_metrics {
        return Ok(());
    }

    let metrics_addr = match config.metrics_bind_address() {
        Some(addr) => addr,
        None => {
            warn!("Metrics disabled: no bind address configured");
            return Ok(());
        }
    };

    let socket_addr: SocketAddr = metrics_addr.parse().map_err(|e| {
        Error::config(format!("Invalid metrics bind address '{}': {}", metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .add_global_label("service", &config.service_name)
        .install()
        .map_err(|e| Error::config(format!("Failed to initialize metrics exporter: {}", e)))?;

    describe_metrics();

    info!(metrics_addr = %metrics_addr, service_name = %config.service_name, "Metrics collection initialized");
    Ok(())
}

fn describe_metrics() {
    describe_counter!("remediation_decisions_total", "Policy gate decisions by outcome");
    describe_counter!("remediation_runs_total", "Remediation runs by final status");
    describe_histogram!(
        "remediation_run_duration_seconds",
        Unit::Seconds,
        "Wall time of one remediation run"
    );
    describe_counter!("remediation_secrets_rotated_total", "Secrets rotated by remediation runs");
    describe_counter!("http_requests_total", "HTTP requests by method, path and status");
    describe_histogram!("http_request_duration_seconds", Unit::Seconds, "HTTP request latency");
}

/// Count a policy gate decision (`dry_run`, `skipped`, `proceed`).
pub fn record_policy_decision(decision: &'static str) {
    counter!("remediation_decisions_total", "decision" => decision).increment(1);
}

/// Record the outcome of one engine run.
pub fn record_remediation_run(status: &'static str, rotated_secrets: usize, duration_seconds: f64) {
    counter!("remediation_runs_total", "status" => status).increment(1);
    histogram!("remediation_run_duration_seconds").record(duration_seconds);
    counter!("remediation_secrets_rotated_total").increment(rotated_secrets as u64);
}

/// Record one served HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_seconds: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds").record(duration_seconds);
}
