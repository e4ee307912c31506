//! Service configuration from `PLAYGATE_*` environment variables.
use std::{
    collections::BTreeSet,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    str::FromStr,
};

use axum::http::HeaderValue;
use thiserror::Error;

use playgate_core::{CoordinatorConfig, DEFAULT_SHARED_RESULT_PATH, ResultChannel};
use playgate_exec::subprocess::PlaybookRunnerConfig;
use playgate_model::{PlaybookId, TimeoutMs};
use playgate_observe::{LogConfig, LogFormat, LogLevel, LogTimeZone};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TIMEOUT_MS: TimeoutMs = 300_000;

#[derive(Debug, Error)]
#[error("invalid {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(key: &'static str, reason: impl ToString) -> Self {
        Self {
            key,
            reason: reason.to_string(),
        }
    }
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Everything `playgate-agentd` reads at startup.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub host: IpAddr,
    pub port: u16,
    pub runner: PlaybookRunnerConfig,
    pub health_playbook: PlaybookId,
    pub channel: ResultChannel,
    /// `None` when disabled with `0`.
    pub timeout_ms: Option<TimeoutMs>,
    pub allowed: Option<BTreeSet<PlaybookId>>,
    pub cors: CorsOrigins,
    pub metrics: bool,
    pub log: LogConfig,
}

impl AgentConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from `lookup`, which maps a variable name to its value.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `PLAYGATE_HOST` | `0.0.0.0` |
    /// | `PLAYGATE_PORT` | `5000` |
    /// | `PLAYGATE_RUNNER` | `ansible-playbook` |
    /// | `PLAYGATE_PLAYBOOK_DIR` | `/etc/ansible/playbooks` |
    /// | `PLAYGATE_HEALTH_PLAYBOOK` | `check_ports.yml` |
    /// | `PLAYGATE_RESULT_PATH` | `/etc/ansible/results/check_ports_results.json` |
    /// | `PLAYGATE_RESULT_DIR` | unset; when set, one artifact file per run |
    /// | `PLAYGATE_RUN_TIMEOUT_MS` | `300000`; `0` disables |
    /// | `PLAYGATE_ALLOWED_PLAYBOOKS` | unset; comma-separated |
    /// | `PLAYGATE_CORS_ORIGINS` | `*` |
    /// | `PLAYGATE_METRICS` | `true` |
    /// | `PLAYGATE_LOG_FORMAT` | `text` |
    /// | `PLAYGATE_LOG_LEVEL` | `info` |
    /// | `PLAYGATE_LOG_TZ` | `utc` |
    /// | `PLAYGATE_LOG_COLOR` | `true` |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let defaults = PlaybookRunnerConfig::default();
        let runner = PlaybookRunnerConfig {
            program: env.get("PLAYGATE_RUNNER").unwrap_or(defaults.program),
            playbook_dir: env
                .get("PLAYGATE_PLAYBOOK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.playbook_dir),
            ..PlaybookRunnerConfig::default()
        };
        runner
            .validate()
            .map_err(|e| ConfigError::new("PLAYGATE_RUNNER", e))?;

        let channel = match env.get("PLAYGATE_RESULT_DIR") {
            Some(dir) => ResultChannel::per_invocation(dir),
            None => ResultChannel::shared(
                env.get("PLAYGATE_RESULT_PATH")
                    .unwrap_or_else(|| DEFAULT_SHARED_RESULT_PATH.to_owned()),
            ),
        };

        let timeout_ms = match env.parse::<TimeoutMs>("PLAYGATE_RUN_TIMEOUT_MS")? {
            Some(0) => None,
            Some(ms) => Some(ms),
            None => Some(DEFAULT_TIMEOUT_MS),
        };

        let allowed = match env.get("PLAYGATE_ALLOWED_PLAYBOOKS") {
            Some(raw) => Some(
                split_list(&raw)
                    .map(PlaybookId::new)
                    .collect::<Result<BTreeSet<_>, _>>()
                    .map_err(|e| ConfigError::new("PLAYGATE_ALLOWED_PLAYBOOKS", e))?,
            ),
            None => None,
        };

        let log = LogConfig {
            format: env.parse::<LogFormat>("PLAYGATE_LOG_FORMAT")?.unwrap_or_default(),
            level: env.parse::<LogLevel>("PLAYGATE_LOG_LEVEL")?.unwrap_or_default(),
            tz: env.parse::<LogTimeZone>("PLAYGATE_LOG_TZ")?.unwrap_or_default(),
            use_color: env.flag("PLAYGATE_LOG_COLOR", true)?,
            ..Default::default()
        };

        Ok(Self {
            host: env
                .parse("PLAYGATE_HOST")?
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: env.parse("PLAYGATE_PORT")?.unwrap_or(DEFAULT_PORT),
            runner,
            health_playbook: match env.parse("PLAYGATE_HEALTH_PLAYBOOK")? {
                Some(playbook) => playbook,
                None => CoordinatorConfig::default().health_playbook,
            },
            channel,
            timeout_ms,
            allowed,
            cors: cors_origins(env.get("PLAYGATE_CORS_ORIGINS"))?,
            metrics: env.flag("PLAYGATE_METRICS", true)?,
            log,
        })
    }

    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            health_playbook: self.health_playbook.clone(),
            channel: self.channel.clone(),
            timeout_ms: self.timeout_ms,
            allowed: self.allowed.clone(),
            ..Default::default()
        }
    }
}

/// Lookup wrapper; empty and whitespace-only values count as unset.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn parse<T>(&self, key: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        self.get(key)
            .map(|raw| raw.parse::<T>().map_err(|e| ConfigError::new(key, e)))
            .transpose()
    }

    fn flag(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::new(key, format!("'{raw}' is not a boolean"))),
            },
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn cors_origins(raw: Option<String>) -> Result<CorsOrigins, ConfigError> {
    let Some(raw) = raw else {
        return Ok(CorsOrigins::Any);
    };
    if raw == "*" {
        return Ok(CorsOrigins::Any);
    }
    split_list(&raw)
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::new("PLAYGATE_CORS_ORIGINS", format!("'{origin}': {e}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}
