use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{LogConfig, LogError, LogFormat, LogResult, LogTimer};

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Call once, early in `main`. With [`LogTimeZone::Local`](crate::LogTimeZone)
/// call [`init_local_offset`](crate::init_local_offset) first.
///
/// ```no_run
/// use playgate_observe::{LogConfig, init_logging};
///
/// init_logging(&LogConfig::default()).expect("logging");
/// tracing::info!("ready");
/// ```
pub fn init_logging(cfg: &LogConfig) -> LogResult<()> {
    match cfg.format {
        LogFormat::Text => text(cfg),
        LogFormat::Json => json(cfg),
        LogFormat::Journald => journald(cfg),
    }
}

fn text(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .with_ansi(cfg.ansi())
        .with_target(cfg.with_targets)
        .with_timer(LogTimer::new(cfg.tz));

    install(
        tracing_subscriber::registry()
            .with(cfg.level.to_env_filter())
            .with(layer),
    )
}

fn json(cfg: &LogConfig) -> LogResult<()> {
    let layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_current_span(true)
        .with_timer(LogTimer::new(cfg.tz));

    install(
        tracing_subscriber::registry()
            .with(cfg.level.to_env_filter())
            .with(layer),
    )
}

#[cfg(target_os = "linux")]
fn journald(cfg: &LogConfig) -> LogResult<()> {
    let layer = tracing_journald::layer()
        .map_err(|e| LogError::Journald(e.to_string()))?
        .with_syslog_identifier("playgate".to_owned());

    install(
        tracing_subscriber::registry()
            .with(cfg.level.to_env_filter())
            .with(layer),
    )
}

#[cfg(not(target_os = "linux"))]
fn journald(_cfg: &LogConfig) -> LogResult<()> {
    Err(LogError::JournaldNotSupported)
}

fn install<S>(subscriber: S) -> LogResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}
