//! Command Runner backed by OS subprocesses.
//!
//! Executes `<program> -v <playbook_dir>/<playbook>` through
//! `tokio::process::Command` and captures the exit code and both streams.
mod config;
pub use config::PlaybookRunnerConfig;

mod runner;
pub use runner::PlaybookRunner;

mod stream_log;
pub use stream_log::StreamLogConfig;

use std::sync::Arc;

use playgate_core::Runner;

use crate::ExecError;

/// Validate `config` and build a shareable runner handle for the coordinator.
pub fn playbook_runner(config: PlaybookRunnerConfig) -> Result<Arc<dyn Runner>, ExecError> {
    Ok(Arc::new(PlaybookRunner::new(config)?))
}
