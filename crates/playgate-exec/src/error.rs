use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid runner configuration: {0}")]
    InvalidRunnerConfig(String),
}
