use std::{fmt, path::PathBuf};

use playgate_model::{ENV_RESULT_PATH, Env, Operation, PlaybookId};

/// Everything a runner needs for a single execution.
#[derive(Debug, Clone)]
pub struct Invocation {
    run_id: String,
    operation: Operation,
    playbook: PlaybookId,
    result_path: PathBuf,
    env: Env,
}

impl Invocation {
    /// Build an invocation.
    ///
    /// The artifact location is appended to `env` under [`ENV_RESULT_PATH`],
    /// overriding any configured value of the same name.
    pub fn new(
        run_id: impl Into<String>,
        operation: Operation,
        playbook: PlaybookId,
        result_path: PathBuf,
        env: Env,
    ) -> Self {
        let env = env.with(ENV_RESULT_PATH, result_path.to_string_lossy());
        Self {
            run_id: run_id.into(),
            operation,
            playbook,
            result_path,
            env,
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn playbook(&self) -> &PlaybookId {
        &self.playbook
    }

    /// Where this run is expected to leave its result artifact.
    pub fn result_path(&self) -> &std::path::Path {
        &self.result_path
    }

    /// Extra environment for the runner process.
    pub fn env(&self) -> &Env {
        &self.env
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invocation(run_id={}, operation={}, playbook={}, env_len={})",
            self.run_id,
            self.operation,
            self.playbook,
            self.env.len()
        )
    }
}
