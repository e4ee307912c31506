//! Well-known names shared between the coordinator and the runner side.

/// Environment variable through which a run learns where to write its result artifact.
///
/// Every invocation receives its own value; playbooks should write their JSON result
/// to this path instead of a hardcoded location.
pub const ENV_RESULT_PATH: &str = "PLAYGATE_RESULT_PATH";

/// Playbook executed by the health-check operation unless configured otherwise.
pub const DEFAULT_HEALTH_PLAYBOOK: &str = "check_ports.yml";
