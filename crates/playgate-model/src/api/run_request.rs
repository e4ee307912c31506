use serde::{Deserialize, Serialize};

use crate::PlaybookId;

/// Body of `POST /run_playbook`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunPlaybookRequest {
    pub playbook: PlaybookId,
}
