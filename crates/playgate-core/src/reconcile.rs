//! Turns a finished process plus its (optional) artifact into a [`RunOutcome`].
use tracing::debug;

use playgate_model::{ProcessOutput, RunOutcome};

use crate::artifact::{ArtifactError, ArtifactSlot};

/// What the reconciler did with the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactDisposition {
    /// Artifact was read, parsed and removed.
    Consumed,
    /// Successful run, no artifact present.
    Absent,
    /// Failed run; artifact was not read.
    Skipped,
}

impl ArtifactDisposition {
    pub fn as_label(&self) -> &'static str {
        match self {
            ArtifactDisposition::Consumed => "consumed",
            ArtifactDisposition::Absent => "absent",
            ArtifactDisposition::Skipped => "skipped",
        }
    }
}

/// Result of [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub outcome: RunOutcome,
    pub artifact: ArtifactDisposition,
}

/// Reconcile a process result with its artifact slot.
///
/// - nonzero exit: the process result is passed through and a shared artifact is
///   never read or removed, so a stale file is not attributed to this run;
/// - zero exit: the artifact is consumed, or an empty array stands in for it.
pub async fn reconcile(
    output: ProcessOutput,
    slot: &ArtifactSlot,
) -> Result<Reconciliation, ArtifactError> {
    if !output.success() {
        debug!(exit_code = output.exit_code, "runner reported failure");
        slot.discard().await;
        return Ok(Reconciliation {
            outcome: RunOutcome::Failed(output),
            artifact: ArtifactDisposition::Skipped,
        });
    }

    let reconciliation = match slot.consume().await? {
        Some(payload) => Reconciliation {
            outcome: RunOutcome::Completed { payload },
            artifact: ArtifactDisposition::Consumed,
        },
        None => Reconciliation {
            outcome: RunOutcome::empty(),
            artifact: ArtifactDisposition::Absent,
        },
    };
    debug!(artifact = reconciliation.artifact.as_label(), "run reconciled");
    Ok(reconciliation)
}
