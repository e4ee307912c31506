use async_trait::async_trait;
use playgate_model::{PlaybookId, RunOutcome};

use crate::error::ApiError;

/// Backend of the HTTP surface.
///
/// [`crate::CoordinatorAdapter`] is the ready-made implementation; wrap or
/// replace it to add behavior in front of the coordinator.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Run a caller-chosen playbook.
    async fn run_playbook(&self, playbook: &PlaybookId) -> Result<RunOutcome, ApiError>;

    /// Run the fixed health-check playbook.
    async fn health_check(&self) -> Result<RunOutcome, ApiError>;
}
