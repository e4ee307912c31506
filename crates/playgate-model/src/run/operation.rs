use std::fmt;

/// Which entry point triggered a run.
///
/// Both operations share the same execution and reconciliation path; the
/// distinction only matters for logging, metrics and response shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Caller-chosen playbook.
    AdHoc,
    /// Fixed health-check playbook.
    HealthCheck,
}

impl Operation {
    /// Stable label used in metrics and run ids.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            Operation::AdHoc => "run_playbook",
            Operation::HealthCheck => "health_check",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
