use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{LogFormat, LogLevel, LogTimeZone};

/// Logging setup for the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    pub tz: LogTimeZone,
    /// Include the emitting module path in each record.
    pub with_targets: bool,
    /// ANSI colors for text output; ignored when stdout is not a terminal.
    pub use_color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: LogLevel::default(),
            tz: LogTimeZone::Utc,
            with_targets: true,
            use_color: true,
        }
    }
}

impl LogConfig {
    /// Whether text output should carry ANSI colors right now.
    pub fn ansi(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}
