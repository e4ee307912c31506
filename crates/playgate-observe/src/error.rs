use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("unknown log format '{0}' (expected text, json or journald)")]
    InvalidFormat(String),

    #[error("invalid log level '{value}': {reason}")]
    InvalidLevel { value: String, reason: String },

    #[error("unknown log timezone '{0}' (expected utc or local)")]
    InvalidTimeZone(String),

    #[error("journald output is only available on Linux")]
    JournaldNotSupported,

    #[error("cannot connect to journald: {0}")]
    Journald(String),

    #[error("global subscriber is already installed")]
    AlreadyInitialized,
}

pub type LogResult<T> = Result<T, LogError>;
