//! Handoff channel between the runner process and the coordinator.
//!
//! A run's artifact is a JSON file the runner writes before exiting. The
//! coordinator reads it at most once and removes it, so later runs never
//! observe a stale result.
mod error;
pub use error::ArtifactError;

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, warn};

/// Artifact location used by the stock health-check playbook.
pub const DEFAULT_SHARED_RESULT_PATH: &str = "/etc/ansible/results/check_ports_results.json";

/// Where runs leave their result artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultChannel {
    /// Every run uses the same file. Runs must be serialized.
    Shared { path: PathBuf },
    /// Every run gets `<dir>/<run_id>.json`.
    PerInvocation { dir: PathBuf },
}

impl ResultChannel {
    pub fn shared(path: impl Into<PathBuf>) -> Self {
        ResultChannel::Shared { path: path.into() }
    }

    pub fn per_invocation(dir: impl Into<PathBuf>) -> Self {
        ResultChannel::PerInvocation { dir: dir.into() }
    }

    /// `true` when concurrent runs would collide on one path.
    pub fn is_shared(&self) -> bool {
        matches!(self, ResultChannel::Shared { .. })
    }

    /// Artifact slot for the given run.
    pub fn slot(&self, run_id: &str) -> ArtifactSlot {
        match self {
            ResultChannel::Shared { path } => ArtifactSlot {
                path: path.clone(),
                owned: false,
            },
            ResultChannel::PerInvocation { dir } => ArtifactSlot {
                path: dir.join(format!("{run_id}.json")),
                owned: true,
            },
        }
    }
}

impl Default for ResultChannel {
    fn default() -> Self {
        ResultChannel::shared(DEFAULT_SHARED_RESULT_PATH)
    }
}

/// Artifact location of a single run.
#[derive(Debug, Clone)]
pub struct ArtifactSlot {
    path: PathBuf,
    /// Path is private to this run (per-invocation channel).
    owned: bool,
}

impl ArtifactSlot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Read, parse and remove the artifact.
    ///
    /// Returns `Ok(None)` when no artifact exists; nothing is removed in that case.
    /// Once the file has been found it is removed whether or not it parses.
    pub async fn consume(&self) -> Result<Option<Value>, ArtifactError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no result artifact");
                return Ok(None);
            }
            Err(source) => {
                if let Err(e) = self.remove().await {
                    warn!(error = %e, "unreadable artifact left in place");
                }
                return Err(ArtifactError::Unreadable {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let parsed = serde_json::from_slice::<Value>(&bytes);
        let removed = self.remove().await;

        let value = parsed.map_err(|source| ArtifactError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        removed?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "result artifact consumed");
        Ok(Some(value))
    }

    /// Remove the artifact of a failed run without reading it.
    ///
    /// Only acts on run-private slots; a shared slot may hold another run's
    /// result and is left untouched.
    pub async fn discard(&self) {
        if !self.owned {
            return;
        }
        if let Err(e) = self.remove().await {
            warn!(error = %e, "failed to discard artifact of failed run");
        }
    }

    /// Remove whatever an aborted run may have written, shared slots included.
    ///
    /// Callers must hold the execution lock for a shared slot.
    pub async fn purge(&self) {
        if let Err(e) = self.remove().await {
            warn!(error = %e, "failed to purge artifact of aborted run");
        }
    }

    async fn remove(&self) -> Result<(), ArtifactError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "artifact already removed");
                Ok(())
            }
            Err(source) => Err(ArtifactError::Cleanup {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
