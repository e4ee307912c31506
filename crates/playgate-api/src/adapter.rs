use std::sync::Arc;

use async_trait::async_trait;
use playgate_core::Coordinator;
use playgate_model::{PlaybookId, RunOutcome};

use crate::{error::ApiError, handler::ApiHandler};

/// [`ApiHandler`] that delegates straight to a [`Coordinator`].
pub struct CoordinatorAdapter {
    coordinator: Arc<Coordinator>,
}

impl CoordinatorAdapter {
    pub fn new(coordinator: Arc<Coordinator>) -> Self {
        Self { coordinator }
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }
}

#[async_trait]
impl ApiHandler for CoordinatorAdapter {
    async fn run_playbook(&self, playbook: &PlaybookId) -> Result<RunOutcome, ApiError> {
        self.coordinator
            .run_playbook(playbook)
            .await
            .map_err(ApiError::from)
    }

    async fn health_check(&self) -> Result<RunOutcome, ApiError> {
        self.coordinator.health_check().await.map_err(ApiError::from)
    }
}
