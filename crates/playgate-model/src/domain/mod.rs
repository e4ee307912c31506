mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;

mod playbook;
pub use playbook::PlaybookId;

mod constants;
pub use constants::{DEFAULT_HEALTH_PLAYBOOK, ENV_RESULT_PATH};

/// Timeout value in milliseconds.
///
/// Used by the coordinator to bound a single runner invocation.
pub type TimeoutMs = u64;
