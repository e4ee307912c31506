use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Longest identifier accepted, in bytes.
const MAX_LEN: usize = 255;

/// Relative name of a playbook under the configured playbook directory.
///
/// The value ends up as part of the runner's command line, so it is only
/// constructible through validation:
/// - non-empty and at most 255 bytes;
/// - relative (no leading `/`), `/`-separated segments;
/// - every segment is non-empty and neither `.` nor `..`;
/// - only ASCII alphanumerics, `.`, `_` and `-`.
///
/// # Examples
/// ```
/// use playgate_model::PlaybookId;
///
/// let id: PlaybookId = "network/check_ports.yml".parse().unwrap();
/// assert_eq!(id.as_str(), "network/check_ports.yml");
///
/// assert!("../etc/passwd".parse::<PlaybookId>().is_err());
/// assert!("deploy.yml; rm -rf /".parse::<PlaybookId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct PlaybookId(String);

impl PlaybookId {
    /// Validate and wrap an identifier.
    pub fn new(s: impl Into<String>) -> ModelResult<Self> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the `/`-separated path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

fn check(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("must not be empty");
    }
    if s.len() > MAX_LEN {
        return Err("longer than 255 bytes");
    }
    if s.starts_with('/') {
        return Err("must be relative to the playbook directory");
    }
    for segment in s.split('/') {
        match segment {
            "" => return Err("contains an empty path segment"),
            "." | ".." => return Err("must not contain '.' or '..' segments"),
            _ => {}
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        if !segment.chars().all(allowed) {
            return Err("only ASCII letters, digits, '.', '_', '-' and '/' are allowed");
        }
    }
    Ok(())
}

impl TryFrom<String> for PlaybookId {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match check(&s) {
            Ok(()) => Ok(Self(s)),
            Err(reason) => Err(ModelError::InvalidPlaybook { value: s, reason }),
        }
    }
}

impl FromStr for PlaybookId {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl From<PlaybookId> for String {
    fn from(id: PlaybookId) -> Self {
        id.0
    }
}

impl AsRef<str> for PlaybookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaybookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
