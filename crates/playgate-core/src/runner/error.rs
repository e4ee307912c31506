use thiserror::Error;

use playgate_model::TimeoutMs;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn runner: {0}")]
    Spawn(String),

    #[error("runner io error: {0}")]
    Io(String),

    #[error("runner timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: TimeoutMs },

    #[error("runner was canceled")]
    Canceled,
}

impl RunnerError {
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerError::Spawn(_) => "spawn_failed",
            RunnerError::Io(_) => "io_failed",
            RunnerError::Timeout { .. } => "timeout",
            RunnerError::Canceled => "canceled",
        }
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        RunnerError::Io(e.to_string())
    }
}
