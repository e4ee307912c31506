use thiserror::Error;

use playgate_model::PlaybookId;

use crate::{artifact::ArtifactError, runner::RunnerError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("playbook '{0}' is not in the allow-list")]
    NotAllowed(PlaybookId),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl CoreError {
    /// Stable snake_case label for metrics and failure envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::NotAllowed(_) => "not_allowed",
            CoreError::Runner(e) => e.kind(),
            CoreError::Artifact(e) => e.kind(),
        }
    }
}
