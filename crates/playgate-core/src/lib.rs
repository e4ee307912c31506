pub mod artifact;
pub mod coordinator;
pub mod error;
pub mod metrics;
pub mod reconcile;
pub mod runner;

pub use artifact::{ArtifactError, ArtifactSlot, DEFAULT_SHARED_RESULT_PATH, ResultChannel};
pub use coordinator::{Coordinator, CoordinatorConfig};
pub use error::CoreError;
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, RunStatus, noop_metrics};
pub use reconcile::{ArtifactDisposition, Reconciliation, reconcile};
pub use runner::{Invocation, Runner, RunnerError};
