use std::{ffi::OsString, fmt, path::PathBuf};

use tokio::process::Command;
use tracing::trace;

use playgate_model::PlaybookId;

use crate::{ExecError, subprocess::StreamLogConfig};

/// Default runner executable.
pub const DEFAULT_PROGRAM: &str = "ansible-playbook";

/// Default directory playbook identifiers are resolved against.
pub const DEFAULT_PLAYBOOK_DIR: &str = "/etc/ansible/playbooks";

/// How to launch the external automation runner.
#[derive(Debug, Clone)]
pub struct PlaybookRunnerConfig {
    /// Executable name or path (e.g. `"ansible-playbook"`).
    pub program: String,
    /// Base directory for playbook identifiers.
    pub playbook_dir: PathBuf,
    /// Working directory; `None` inherits the service's.
    pub cwd: Option<PathBuf>,
    /// Logging of captured output.
    pub log: StreamLogConfig,
}

impl Default for PlaybookRunnerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            playbook_dir: PathBuf::from(DEFAULT_PLAYBOOK_DIR),
            cwd: None,
            log: StreamLogConfig::default(),
        }
    }
}

impl PlaybookRunnerConfig {
    /// Rules:
    /// - `program` is not empty or whitespace-only;
    /// - `playbook_dir` is not empty.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidRunnerConfig(
                "runner program is empty".into(),
            ));
        }
        if self.playbook_dir.as_os_str().is_empty() {
            return Err(ExecError::InvalidRunnerConfig(
                "playbook directory is empty".into(),
            ));
        }
        Ok(())
    }

    /// `<playbook_dir>/<playbook>`.
    pub fn playbook_path(&self, playbook: &PlaybookId) -> PathBuf {
        let mut path = self.playbook_dir.clone();
        path.extend(playbook.segments());
        path
    }

    /// Arguments passed to `program`: `-v <playbook path>`.
    pub fn args(&self, playbook: &PlaybookId) -> Vec<OsString> {
        vec![
            OsString::from("-v"),
            self.playbook_path(playbook).into_os_string(),
        ]
    }

    /// Build the command for `playbook`, without stdio or environment set up.
    pub(crate) fn command(&self, playbook: &PlaybookId) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(playbook));
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        trace!(
            program = %self.program,
            args = ?self.args(playbook),
            cwd = ?self.cwd,
            "runner command built"
        );
        cmd
    }
}

impl fmt::Display for PlaybookRunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlaybookRunnerConfig(program='{}', playbook_dir={:?}, cwd={:?})",
            self.program, self.playbook_dir, self.cwd,
        )
    }
}
