use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use playgate_core::{Invocation, Runner, RunnerError};
use playgate_model::ProcessOutput;

use crate::{ExecError, subprocess::PlaybookRunnerConfig};

/// Runner that executes playbooks as OS subprocesses.
pub struct PlaybookRunner {
    config: PlaybookRunnerConfig,
}

impl PlaybookRunner {
    /// Create a runner after validating `config`.
    pub fn new(config: PlaybookRunnerConfig) -> Result<Self, ExecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlaybookRunnerConfig {
        &self.config
    }
}

#[async_trait]
impl Runner for PlaybookRunner {
    fn name(&self) -> &'static str {
        "playbook"
    }

    async fn run(
        &self,
        invocation: &Invocation,
        cancel: CancellationToken,
    ) -> Result<ProcessOutput, RunnerError> {
        let mut cmd = self.config.command(invocation.playbook());
        for kv in invocation.env().iter() {
            cmd.env(kv.key(), kv.value());
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // Timeouts drop this future; the child must not outlive it.
        cmd.kill_on_drop(true);

        trace!(run_id = invocation.run_id(), "spawning runner");
        let mut child = cmd.spawn().map_err(|e| {
            RunnerError::Spawn(format!("{}: {e}", self.config.program))
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (status, stdout, stderr) = tokio::select! {
            (status, stdout, stderr) = async { tokio::join!(child.wait(), drain(stdout), drain(stderr)) } => {
                (status?, stdout?, stderr?)
            }
            _ = cancel.cancelled() => {
                debug!(run_id = invocation.run_id(), "cancellation requested; killing runner");
                if let Err(e) = child.kill().await {
                    debug!("failed to kill runner: {e}");
                }
                return Err(RunnerError::Canceled);
            }
        };

        let output = ProcessOutput::new(exit_code(status), stdout, stderr);
        debug!(
            run_id = invocation.run_id(),
            exit_code = output.exit_code,
            stdout_len = output.stdout.len(),
            stderr_len = output.stderr.len(),
            "runner exited"
        );
        self.config.log.log(invocation.run_id(), &output);
        Ok(output)
    }
}

/// Read a captured pipe to the end as lossy UTF-8.
async fn drain<R>(pipe: Option<R>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Exit code, or the negated signal number for signal-terminated processes.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}
