//! Prometheus metrics.
//!
//! Counters and histograms go through the `metrics` facade and are rendered by a process-wide
//! Prometheus recorder. A small in-process summary is kept alongside for the health endpoint;
//! it is updated with `try_write` and skipped under contention, so it may lag slightly.
//!
//! Method labels are restricted to the supported method table. Anything else is recorded as
//! `unsupported` to keep label cardinality bounded.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};
use tokio::sync::RwLock;

use crate::proxy::methods::policy_for;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn method_label(method: &str) -> &'static str {
    policy_for(method).map_or("unsupported", |p| p.method)
}

fn init_prometheus_recorder() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "failed to install Prometheus recorder, attempting fallback"
                );
                let recorder = PrometheusBuilder::new().build_recorder();
                tracing::warn!(
                    "using fallback Prometheus recorder, metrics may not be globally visible"
                );
                recorder.handle()
            }
        })
        .clone()
}

/// Outcome label of a client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    /// Rejected before any backend was contacted.
    Rejected,
    /// Backends could not agree.
    ConsensusFailure,
    Internal,
}

impl RequestOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::ConsensusFailure => "consensus_failure",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSummary {
    pub total_requests: u64,
    pub failed_requests: u64,
    pub consensus_failures: u64,
    pub backend_errors: u64,
    pub requests_by_method: HashMap<String, u64>,
    pub errors_by_backend: HashMap<String, u64>,
}

pub struct MetricsCollector {
    summary: Arc<RwLock<MetricsSummary>>,
    prometheus_handle: PrometheusHandle,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            summary: Arc::new(RwLock::new(MetricsSummary::default())),
            prometheus_handle: init_prometheus_recorder(),
        }
    }

    /// Records one finished client request.
    pub fn record_request(&self, method: &str, outcome: RequestOutcome, latency_ms: u64) {
        let method = method_label(method);

        counter!("rpc_requests_total", "method" => method, "outcome" => outcome.as_str())
            .increment(1);
        #[allow(clippy::cast_precision_loss)]
        histogram!("rpc_request_duration_seconds", "method" => method)
            .record(latency_ms as f64 / 1000.0);

        if let Ok(mut summary) = self.summary.try_write() {
            summary.total_requests += 1;
            if outcome != RequestOutcome::Success {
                summary.failed_requests += 1;
            }
            *summary.requests_by_method.entry(method.to_string()).or_default() += 1;
        }
    }

    /// Records one failed backend call. `kind` is a static error label such as `timeout`.
    pub fn record_backend_error(&self, backend: &str, kind: &'static str) {
        counter!("backend_errors_total", "backend" => backend.to_string(), "kind" => kind)
            .increment(1);

        if let Ok(mut summary) = self.summary.try_write() {
            summary.backend_errors += 1;
            *summary.errors_by_backend.entry(backend.to_string()).or_default() += 1;
        }
    }

    pub fn record_consensus_failure(&self, method: &str, reason: &'static str) {
        counter!("consensus_failures_total", "method" => method_label(method), "reason" => reason)
            .increment(1);

        if let Ok(mut summary) = self.summary.try_write() {
            summary.consensus_failures += 1;
        }
    }

    pub fn record_batch(&self, size: usize) {
        #[allow(clippy::cast_precision_loss)]
        histogram!("rpc_batch_size").record(size as f64);
    }

    #[must_use]
    pub fn get_prometheus_metrics(&self) -> String {
        self.prometheus_handle.render()
    }

    pub async fn get_metrics_summary(&self) -> MetricsSummary {
        self.summary.read().await.clone()
    }
}
