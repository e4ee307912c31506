use std::sync::Arc;

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use playgate_core::{MetricsBackend, RunStatus};

const NAMESPACE: &str = "playgate";

/// Playbook runs take seconds to minutes.
const DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0];

/// Prometheus implementation of [`MetricsBackend`].
///
/// Every label is bounded: `operation` is `run_playbook` or `health_check`,
/// `status` is a [`RunStatus`] label, `error_kind` a core error kind and
/// `state` an artifact state.
#[derive(Clone)]
pub struct PrometheusMetrics {
    runs_started: CounterVec,
    runs_completed: CounterVec,
    run_duration: HistogramVec,
    run_errors: CounterVec,
    artifacts: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Register playgate metrics in `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let runs_started = CounterVec::new(
            Opts::new("runs_started_total", "Playbook runs started").namespace(NAMESPACE),
            &["operation"],
        )?;
        registry.register(Box::new(runs_started.clone()))?;

        let runs_completed = CounterVec::new(
            Opts::new("runs_completed_total", "Playbook runs finished, by status")
                .namespace(NAMESPACE),
            &["operation", "status"],
        )?;
        registry.register(Box::new(runs_completed.clone()))?;

        let run_duration = HistogramVec::new(
            HistogramOpts::new("run_duration_seconds", "Playbook run wall time in seconds")
                .namespace(NAMESPACE)
                .buckets(DURATION_BUCKETS.to_vec()),
            &["operation"],
        )?;
        registry.register(Box::new(run_duration.clone()))?;

        let run_errors = CounterVec::new(
            Opts::new("run_errors_total", "Runs that ended without a process result")
                .namespace(NAMESPACE),
            &["operation", "error_kind"],
        )?;
        registry.register(Box::new(run_errors.clone()))?;

        let artifacts = CounterVec::new(
            Opts::new("artifacts_total", "Result artifacts seen after successful runs")
                .namespace(NAMESPACE),
            &["operation", "state"],
        )?;
        registry.register(Box::new(artifacts.clone()))?;

        Ok(Self {
            runs_started,
            runs_completed,
            run_duration,
            run_errors,
            artifacts,
            registry,
        })
    }

    /// Register playgate metrics in a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut out = String::new();
        TextEncoder::new().encode_utf8(&self.gather(), &mut out)?;
        Ok(out)
    }

    /// Content type matching [`Self::encode_text`].
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_owned()
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_run_started(&self, operation: &str) {
        self.runs_started.with_label_values(&[operation]).inc();
    }

    fn record_run_completed(&self, operation: &str, status: RunStatus, duration_ms: u64) {
        self.runs_completed
            .with_label_values(&[operation, status.as_label()])
            .inc();
        self.run_duration
            .with_label_values(&[operation])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_run_error(&self, operation: &str, error_kind: &str) {
        self.run_errors
            .with_label_values(&[operation, error_kind])
            .inc();
    }

    fn record_artifact(&self, operation: &str, state: &str) {
        self.artifacts.with_label_values(&[operation, state]).inc();
    }
}
