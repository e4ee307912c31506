use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("result artifact {} could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("result artifact {} is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("result artifact {} could not be removed: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub fn kind(&self) -> &'static str {
        match self {
            ArtifactError::Unreadable { .. } => "artifact_unreadable",
            ArtifactError::Corrupt { .. } => "artifact_corrupt",
            ArtifactError::Cleanup { .. } => "artifact_cleanup_failed",
        }
    }
}
