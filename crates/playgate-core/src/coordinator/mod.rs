//! Execution-and-reconciliation coordinator.
//!
//! Maps an operation to a runner invocation, bounds it in time, ties it to the
//! service shutdown token and reconciles the result with its artifact.
//! With a shared result channel every run holds a global execution lock from
//! spawn until the artifact has been consumed.
use std::{collections::BTreeSet, sync::Arc, time::Duration, time::Instant};

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use playgate_model::{
    DEFAULT_HEALTH_PLAYBOOK, Env, Operation, PlaybookId, ProcessOutput, RunOutcome, TimeoutMs,
};

use crate::{
    artifact::{ArtifactError, ResultChannel},
    error::CoreError,
    metrics::{MetricsHandle, RunStatus, noop_metrics},
    reconcile::{ArtifactDisposition, Reconciliation, reconcile},
    runner::{Invocation, Runner, RunnerError, make_run_id},
};

/// Coordinator settings.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Playbook run by [`Coordinator::health_check`].
    pub health_playbook: PlaybookId,
    /// Artifact handoff channel.
    pub channel: ResultChannel,
    /// Hard limit per run; `None` waits indefinitely.
    pub timeout_ms: Option<TimeoutMs>,
    /// If set, ad-hoc runs are restricted to these playbooks.
    pub allowed: Option<BTreeSet<PlaybookId>>,
    /// Extra environment for every runner process.
    pub env: Env,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            health_playbook: PlaybookId::new(DEFAULT_HEALTH_PLAYBOOK)
                .expect("default health playbook must be valid"),
            channel: ResultChannel::default(),
            timeout_ms: Some(300_000),
            allowed: None,
            env: Env::default(),
        }
    }
}

pub struct Coordinator {
    runner: Arc<dyn Runner>,
    config: CoordinatorConfig,
    exec_lock: Mutex<()>,
    shutdown: CancellationToken,
    metrics: MetricsHandle,
}

impl Coordinator {
    pub fn new(runner: Arc<dyn Runner>, config: CoordinatorConfig) -> Self {
        Self {
            runner,
            config,
            exec_lock: Mutex::new(()),
            shutdown: CancellationToken::new(),
            metrics: noop_metrics(),
        }
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Cancel all in-flight and future runs.
    pub fn shutdown(&self) {
        info!("coordinator shutting down; canceling in-flight runs");
        self.shutdown.cancel();
    }

    /// Run a caller-chosen playbook.
    pub async fn run_playbook(&self, playbook: &PlaybookId) -> Result<RunOutcome, CoreError> {
        if let Some(allowed) = &self.config.allowed {
            if !allowed.contains(playbook) {
                warn!(%playbook, "playbook rejected by allow-list");
                return Err(CoreError::NotAllowed(playbook.clone()));
            }
        }
        self.execute(Operation::AdHoc, playbook).await
    }

    /// Run the configured health-check playbook.
    pub async fn health_check(&self) -> Result<RunOutcome, CoreError> {
        let playbook = self.config.health_playbook.clone();
        self.execute(Operation::HealthCheck, &playbook).await
    }

    #[instrument(level = "debug", skip(self), fields(operation = %operation))]
    async fn execute(
        &self,
        operation: Operation,
        playbook: &PlaybookId,
    ) -> Result<RunOutcome, CoreError> {
        let cancel = self.shutdown.child_token();
        let op = operation.as_label();

        let _guard = if self.config.channel.is_shared() {
            tokio::select! {
                guard = self.exec_lock.lock() => Some(guard),
                _ = cancel.cancelled() => {
                    self.metrics.record_run_error(op, RunnerError::Canceled.kind());
                    return Err(RunnerError::Canceled.into());
                }
            }
        } else {
            None
        };

        let run_id = make_run_id(operation);
        let slot = self.config.channel.slot(&run_id);
        let invocation = Invocation::new(
            run_id,
            operation,
            playbook.clone(),
            slot.path().to_path_buf(),
            self.config.env.clone(),
        );
        debug!(%invocation, runner = self.runner.name(), path = %slot.path().display(), "starting run");

        self.metrics.record_run_started(op);
        let started = Instant::now();

        let result = match self.invoke(&invocation, cancel).await {
            Ok(output) => reconcile(output, &slot).await.map_err(CoreError::from),
            Err(e) => {
                // No exit status to reconcile. A killed runner may have left a
                // partial artifact; a runner that never started left none.
                if matches!(e, RunnerError::Spawn(_)) {
                    slot.discard().await;
                } else {
                    slot.purge().await;
                }
                Err(CoreError::from(e))
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        self.observe(&invocation, &result, duration_ms);

        result.map(|rec| rec.outcome)
    }

    async fn invoke(
        &self,
        invocation: &Invocation,
        cancel: CancellationToken,
    ) -> Result<ProcessOutput, RunnerError> {
        let run = self.runner.run(invocation, cancel);
        match self.config.timeout_ms {
            Some(timeout_ms) => tokio::time::timeout(Duration::from_millis(timeout_ms), run)
                .await
                .map_err(|_| RunnerError::Timeout { timeout_ms })?,
            None => run.await,
        }
    }

    fn observe(
        &self,
        invocation: &Invocation,
        result: &Result<Reconciliation, CoreError>,
        duration_ms: u64,
    ) {
        let op = invocation.operation().as_label();
        let run_id = invocation.run_id();
        let playbook = invocation.playbook();

        let status = match result {
            Ok(rec) => {
                if rec.artifact != ArtifactDisposition::Skipped {
                    self.metrics.record_artifact(op, rec.artifact.as_label());
                }
                match &rec.outcome {
                    RunOutcome::Completed { .. } => {
                        info!(run_id, %playbook, duration_ms, artifact = rec.artifact.as_label(), "run completed");
                        RunStatus::Success
                    }
                    RunOutcome::Failed(output) => {
                        warn!(run_id, %playbook, duration_ms, exit_code = output.exit_code, "run failed");
                        RunStatus::Failure
                    }
                }
            }
            Err(err) => {
                if let CoreError::Artifact(ArtifactError::Corrupt { .. }) = err {
                    self.metrics.record_artifact(op, "corrupt");
                }
                self.metrics.record_run_error(op, err.kind());
                error!(run_id, %playbook, duration_ms, kind = err.kind(), error = %err, "run errored");
                RunStatus::from_error(err)
            }
        };

        self.metrics.record_run_completed(op, status, duration_ms);
    }
}

#[cfg(test)]
mod tests;
