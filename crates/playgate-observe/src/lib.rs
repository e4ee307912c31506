//! Process-wide structured logging for the playgate service.
//!
//! The service configures one global `tracing` subscriber at startup from a
//! [`LogConfig`]; every crate in the workspace then logs through the plain
//! `tracing` macros.
mod config;
mod error;
mod format;
mod init;
mod level;
mod timer;

pub use config::LogConfig;
pub use error::{LogError, LogResult};
pub use format::LogFormat;
pub use init::init_logging;
pub use level::LogLevel;
pub use timer::{LogTimeZone, LogTimer, init_local_offset};
