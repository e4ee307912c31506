mod app;
mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use playgate_core::{Coordinator, ResultChannel};
use playgate_exec::subprocess::playbook_runner;
use playgate_observe::{LogTimeZone, init_local_offset, init_logging};
use playgate_prometheus::PrometheusMetrics;

use crate::config::AgentConfig;

fn main() -> anyhow::Result<()> {
    // 1) config (.env is optional)
    let dotenv = dotenvy::dotenv();
    let config = AgentConfig::from_env()?;

    // 2) logger; the local offset can only be read before threads exist
    if config.log.tz == LogTimeZone::Local {
        init_local_offset();
    }
    init_logging(&config.log)?;
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(serve(config))
}

async fn serve(config: AgentConfig) -> anyhow::Result<()> {
    // 3) runner + result channel
    let runner = playbook_runner(config.runner.clone())?;
    if let ResultChannel::PerInvocation { dir } = &config.channel {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create result dir {}", dir.display()))?;
    }

    // 4) coordinator + metrics
    let metrics = if config.metrics {
        Some(PrometheusMetrics::new().context("failed to register metrics")?)
    } else {
        None
    };
    let mut coordinator = Coordinator::new(runner, config.coordinator_config());
    if let Some(metrics) = &metrics {
        coordinator = coordinator.with_metrics(Arc::new(metrics.clone()));
    }
    let coordinator = Arc::new(coordinator);

    // 5) http
    let app = app::router(coordinator.clone(), metrics, &config.cors);
    let addr = SocketAddr::new(config.host, config.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        runner = %config.runner,
        shared_channel = config.channel.is_shared(),
        timeout_ms = ?config.timeout_ms,
        allow_list = config.allowed.as_ref().map(|a| a.len()),
        "playgate listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // In-flight runs would otherwise hold their connections open.
            coordinator.shutdown();
        })
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
