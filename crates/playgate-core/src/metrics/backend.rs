use std::sync::Arc;

use crate::{error::CoreError, runner::RunnerError};

/// How a run ended, from the metrics point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Runner exited 0 and the artifact (if any) was consumed.
    Success,
    /// Runner exited nonzero.
    Failure,
    /// Run exceeded its timeout.
    Timeout,
    /// Run was canceled by shutdown.
    Canceled,
    /// Spawn, io or artifact problem.
    Error,
}

impl RunStatus {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            RunStatus::Success => "success",
            RunStatus::Failure => "failure",
            RunStatus::Timeout => "timeout",
            RunStatus::Canceled => "canceled",
            RunStatus::Error => "error",
        }
    }

    pub(crate) fn from_error(err: &CoreError) -> Self {
        match err {
            CoreError::Runner(RunnerError::Timeout { .. }) => RunStatus::Timeout,
            CoreError::Runner(RunnerError::Canceled) => RunStatus::Canceled,
            _ => RunStatus::Error,
        }
    }
}

/// Backend metrics collection interface.
///
/// All `operation` arguments are [`playgate_model::Operation::as_label`] values,
/// so label cardinality stays bounded.
pub trait MetricsBackend: Send + Sync + 'static {
    /// A run acquired its execution slot and is about to spawn the runner.
    fn record_run_started(&self, operation: &str);
    /// A run finished, whatever the result.
    fn record_run_completed(&self, operation: &str, status: RunStatus, duration_ms: u64);
    /// A run failed for a reason other than the runner's exit code.
    ///
    /// `error_kind` is [`CoreError::kind`].
    fn record_run_error(&self, operation: &str, error_kind: &str);
    /// What happened to the result artifact of a successful run:
    /// `consumed`, `absent` or `corrupt`.
    fn record_artifact(&self, operation: &str, state: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
