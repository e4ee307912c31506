use crate::metrics::backend::{MetricsBackend, RunStatus};

/// Metrics backend that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_run_started(&self, _: &str) {}

    #[inline(always)]
    fn record_run_completed(&self, _: &str, _: RunStatus, _: u64) {}

    #[inline(always)]
    fn record_run_error(&self, _: &str, _: &str) {}

    #[inline(always)]
    fn record_artifact(&self, _: &str, _: &str) {}
}
