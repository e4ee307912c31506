use serde_json::Value;

use crate::ProcessOutput;

/// Normalized result of one reconciled run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Runner exited 0. `payload` is the parsed artifact, or an empty
    /// array when the runner wrote none.
    Completed { payload: Value },
    /// Runner exited nonzero. The artifact was not touched.
    Failed(ProcessOutput),
}

impl RunOutcome {
    /// Outcome of a successful run that produced no artifact.
    pub fn empty() -> Self {
        RunOutcome::Completed {
            payload: Value::Array(Vec::new()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}
