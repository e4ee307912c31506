mod domain;
pub use domain::{DEFAULT_HEALTH_PLAYBOOK, ENV_RESULT_PATH};
pub use domain::{Env, KeyValue, PlaybookId, TimeoutMs};

mod error;
pub use error::{ModelError, ModelResult};

mod run;
pub use run::{Operation, ProcessOutput, RunOutcome};

mod api;
pub use api::RunPlaybookRequest;
