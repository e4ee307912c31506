//! Runner abstraction: one blocking execution of the external automation tool.
//!
//! Concrete runners live in `playgate-exec`; tests plug in scripted fakes.
mod error;
pub use error::RunnerError;

mod id;
pub use id::make_run_id;

mod invocation;
pub use invocation::Invocation;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use playgate_model::ProcessOutput;

/// Executes a playbook and reports how the process ended.
///
/// Contract:
/// - a nonzero exit is returned as `Ok(ProcessOutput)`, never as an error;
/// - when `cancel` fires the runner stops the process and returns [`RunnerError::Canceled`];
/// - dropping the returned future must also stop the process (the coordinator
///   enforces timeouts by dropping it).
#[async_trait]
pub trait Runner: Send + Sync + 'static {
    /// Runner name used in logs.
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        invocation: &Invocation,
        cancel: CancellationToken,
    ) -> Result<ProcessOutput, RunnerError>;
}
