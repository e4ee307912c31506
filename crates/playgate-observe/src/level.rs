use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::LogError;

/// Validated `EnvFilter` directive string.
///
/// Accepts a bare level (`"debug"`) or per-target directives
/// (`"playgate_core=debug,tower_http=warn,info"`).
///
/// # Examples
/// ```
/// use playgate_observe::LogLevel;
///
/// let level: LogLevel = "playgate_exec=trace,info".parse().unwrap();
/// assert_eq!(level.as_str(), "playgate_exec=trace,info");
/// assert!("playgate_exec=loud".parse::<LogLevel>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel(String);

impl LogLevel {
    pub fn new(s: impl Into<String>) -> Result<Self, LogError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter for the subscriber.
    ///
    /// The directive string was validated on construction, so an unparsable
    /// filter can only come from a `tracing-subscriber` behavior change; it
    /// degrades to `info` instead of failing startup.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self("info".to_owned())
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LogError::InvalidLevel {
                value: s,
                reason: "empty filter".to_owned(),
            });
        }
        match EnvFilter::try_new(trimmed) {
            Ok(_) => Ok(Self(trimmed.to_owned())),
            Err(e) => Err(LogError::InvalidLevel {
                reason: e.to_string(),
                value: s,
            }),
        }
    }
}

impl FromStr for LogLevel {
    type Err = LogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<LogLevel> for String {
    fn from(l: LogLevel) -> Self {
        l.0
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
