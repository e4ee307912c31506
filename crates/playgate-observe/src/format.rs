use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::LogError;

/// Where and how log records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogFormat {
    /// Human-readable lines on stdout.
    #[default]
    Text,
    /// One JSON object per line on stdout.
    Json,
    /// Native systemd-journald records (Linux only).
    Journald,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Journald => "journald",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "journald" | "journal" => {
                if cfg!(target_os = "linux") {
                    Ok(Self::Journald)
                } else {
                    Err(LogError::JournaldNotSupported)
                }
            }
            _ => Err(LogError::InvalidFormat(s.to_owned())),
        }
    }
}

impl TryFrom<String> for LogFormat {
    type Error = LogError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LogFormat> for String {
    fn from(f: LogFormat) -> Self {
        f.as_str().to_owned()
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_ignoring_case_and_space() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    }

    #[test]
    fn rejects_unknown_names() {
        for input in ["", "xml", "logfmt", "text,json"] {
            let err = input.parse::<LogFormat>().unwrap_err();
            assert!(matches!(err, LogError::InvalidFormat(_)), "{input:?}");
        }
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn journald_is_available_on_linux() {
        assert_eq!("journal".parse::<LogFormat>().unwrap(), LogFormat::Journald);
    }

    #[test]
    #[cfg(not(target_os = "linux"))]
    fn journald_is_rejected_elsewhere() {
        let err = "journald".parse::<LogFormat>().unwrap_err();
        assert!(matches!(err, LogError::JournaldNotSupported));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&LogFormat::Json).unwrap(), r#""json""#);
        let parsed: LogFormat = serde_json::from_str(r#""TEXT""#).unwrap();
        assert_eq!(parsed, LogFormat::Text);
        assert!(serde_json::from_str::<LogFormat>(r#""yaml""#).is_err());
    }
}
