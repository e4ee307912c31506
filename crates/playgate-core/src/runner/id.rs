use std::sync::atomic::{AtomicU64, Ordering};

use playgate_model::Operation;
use uuid::Uuid;

/// Process-local monotonically increasing sequence for run identifiers.
static RUN_SEQ: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    RUN_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// Build a run id that is unique within and across process lifetimes.
///
/// Format: `{operation}-{seq:x}-{uuid}`. The value is filesystem-safe and
/// doubles as the artifact file stem in per-invocation mode.
pub fn make_run_id(operation: Operation) -> String {
    format!(
        "{op}-{seq:x}-{uuid}",
        op = operation.as_label(),
        seq = next_seq(),
        uuid = Uuid::new_v4().simple()
    )
}
