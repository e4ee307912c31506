use std::{
    path::PathBuf,
    sync::{
        Mutex as StdMutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use serde_json::json;

use super::*;
use crate::metrics::MetricsBackend;
use playgate_model::ENV_RESULT_PATH;

enum Script {
    /// Optionally write an artifact, then exit with `code`.
    Exit {
        code: i32,
        stderr: &'static str,
        artifact: Option<&'static str>,
    },
    /// Never finish on its own.
    Hang,
    /// Write an artifact, then hang.
    WriteThenHang(&'static str),
}

struct ScriptedRunner {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    seen: StdMutex<Vec<(PlaybookId, PathBuf, Option<String>)>>,
}

impl ScriptedRunner {
    fn new(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            seen: StdMutex::new(Vec::new()),
        }
    }

    fn exit(code: i32, stderr: &'static str, artifact: Option<&'static str>) -> Self {
        Self::new(Script::Exit {
            code,
            stderr,
            artifact,
        })
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Runner for ScriptedRunner {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn run(
        &self,
        invocation: &Invocation,
        cancel: CancellationToken,
    ) -> Result<ProcessOutput, RunnerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        self.seen.lock().unwrap().push((
            invocation.playbook().clone(),
            invocation.result_path().to_path_buf(),
            invocation.env().get(ENV_RESULT_PATH).map(str::to_owned),
        ));

        tokio::time::sleep(self.delay).await;

        let result = match &self.script {
            Script::Exit {
                code,
                stderr,
                artifact,
            } => {
                if let Some(body) = artifact {
                    tokio::fs::write(invocation.result_path(), body).await?;
                }
                Ok(ProcessOutput::new(*code, "PLAY RECAP", *stderr))
            }
            Script::Hang => {
                cancel.cancelled().await;
                Err(RunnerError::Canceled)
            }
            Script::WriteThenHang(body) => {
                tokio::fs::write(invocation.result_path(), body).await?;
                cancel.cancelled().await;
                Err(RunnerError::Canceled)
            }
        };
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[derive(Default)]
struct RecordingMetrics {
    events: StdMutex<Vec<String>>,
}

impl RecordingMetrics {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl MetricsBackend for RecordingMetrics {
    fn record_run_started(&self, operation: &str) {
        self.events.lock().unwrap().push(format!("started:{operation}"));
    }

    fn record_run_completed(&self, operation: &str, status: RunStatus, _: u64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("completed:{operation}:{}", status.as_label()));
    }

    fn record_run_error(&self, operation: &str, error_kind: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error:{operation}:{error_kind}"));
    }

    fn record_artifact(&self, operation: &str, state: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("artifact:{operation}:{state}"));
    }
}

fn shared_config(dir: &tempfile::TempDir) -> CoordinatorConfig {
    CoordinatorConfig {
        channel: ResultChannel::shared(dir.path().join("check_ports_results.json")),
        timeout_ms: Some(5_000),
        ..Default::default()
    }
}

fn playbook(s: &str) -> PlaybookId {
    PlaybookId::new(s).unwrap()
}

#[tokio::test]
async fn health_check_consumes_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = shared_config(&dir);
    let artifact = dir.path().join("check_ports_results.json");
    let runner = Arc::new(ScriptedRunner::exit(
        0,
        "",
        Some(r#"[{"port":22,"status":"open"}]"#),
    ));
    let coordinator = Coordinator::new(runner.clone(), cfg);

    let outcome = coordinator.health_check().await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed {
            payload: json!([{"port": 22, "status": "open"}])
        }
    );
    assert!(!artifact.exists());
    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen[0].0.as_str(), DEFAULT_HEALTH_PLAYBOOK);
    assert_eq!(seen[0].1, artifact);
    assert_eq!(seen[0].2.as_deref(), artifact.to_str());
}

#[tokio::test]
async fn run_playbook_without_artifact_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(ScriptedRunner::exit(0, "", None));
    let coordinator = Coordinator::new(runner, shared_config(&dir));

    let outcome = coordinator.run_playbook(&playbook("deploy.yml")).await.unwrap();
    assert_eq!(outcome, RunOutcome::empty());
}

#[tokio::test]
async fn failed_run_reports_streams_and_keeps_stale_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("check_ports_results.json");
    std::fs::write(&artifact, r#"{"stale":true}"#).unwrap();

    let runner = Arc::new(ScriptedRunner::exit(2, "connection refused", None));
    let coordinator = Coordinator::new(runner, shared_config(&dir));

    let outcome = coordinator.health_check().await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Failed(ProcessOutput::new(2, "PLAY RECAP", "connection refused"))
    );
    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), r#"{"stale":true}"#);
}

#[tokio::test]
async fn allow_list_rejects_before_running() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(ScriptedRunner::exit(0, "", None));
    let cfg = CoordinatorConfig {
        allowed: Some([playbook("deploy.yml")].into_iter().collect()),
        ..shared_config(&dir)
    };
    let coordinator = Coordinator::new(runner.clone(), cfg);

    let err = coordinator
        .run_playbook(&playbook("reboot.yml"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotAllowed(ref p) if p.as_str() == "reboot.yml"));
    assert_eq!(runner.calls.load(Ordering::SeqCst), 0);

    coordinator.run_playbook(&playbook("deploy.yml")).await.unwrap();
    assert_eq!(runner.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn health_check_ignores_allow_list() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(ScriptedRunner::exit(0, "", None));
    let cfg = CoordinatorConfig {
        allowed: Some(BTreeSet::new()),
        ..shared_config(&dir)
    };
    let coordinator = Coordinator::new(runner, cfg);

    assert!(coordinator.health_check().await.is_ok());
}

#[tokio::test]
async fn hung_runner_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(ScriptedRunner::new(Script::Hang));
    let cfg = CoordinatorConfig {
        timeout_ms: Some(50),
        ..shared_config(&dir)
    };
    let coordinator = Coordinator::new(runner, cfg);

    let err = coordinator.health_check().await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Runner(RunnerError::Timeout { timeout_ms: 50 })
    ));
    assert_eq!(err.kind(), "timeout");
}

#[tokio::test]
async fn timed_out_runs_leave_no_per_invocation_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(ScriptedRunner::new(Script::WriteThenHang("[1]")));
    let cfg = CoordinatorConfig {
        channel: ResultChannel::per_invocation(dir.path()),
        timeout_ms: Some(50),
        ..Default::default()
    };
    let coordinator = Coordinator::new(runner.clone(), cfg);

    for _ in 0..3 {
        let err = coordinator.health_check().await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }

    assert_eq!(runner.calls.load(Ordering::SeqCst), 3);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn timed_out_shared_artifact_is_not_handed_to_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("check_ports_results.json");

    let hung = Coordinator::new(
        Arc::new(ScriptedRunner::new(Script::WriteThenHang("[1]"))),
        CoordinatorConfig {
            timeout_ms: Some(50),
            ..shared_config(&dir)
        },
    );
    let err = hung.health_check().await.unwrap_err();
    assert_eq!(err.kind(), "timeout");
    assert!(!artifact.exists());

    let next = Coordinator::new(
        Arc::new(ScriptedRunner::exit(0, "", None)),
        shared_config(&dir),
    );
    assert_eq!(next.health_check().await.unwrap(), RunOutcome::empty());
}

#[tokio::test]
async fn canceled_run_purges_its_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("check_ports_results.json");
    let runner = Arc::new(ScriptedRunner::new(Script::WriteThenHang(r#"{"partial":true}"#)));
    let cfg = CoordinatorConfig {
        timeout_ms: None,
        ..shared_config(&dir)
    };
    let coordinator = Arc::new(Coordinator::new(runner, cfg));

    let c = coordinator.clone();
    let handle = tokio::spawn(async move { c.health_check().await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    coordinator.shutdown();

    let err = handle.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), "canceled");
    assert!(!artifact.exists());
}

#[tokio::test]
async fn shutdown_cancels_in_flight_run() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(ScriptedRunner::new(Script::Hang));
    let cfg = CoordinatorConfig {
        timeout_ms: None,
        ..shared_config(&dir)
    };
    let coordinator = Arc::new(Coordinator::new(runner, cfg));

    let c = coordinator.clone();
    let handle = tokio::spawn(async move { c.run_playbook(&playbook("deploy.yml")).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    coordinator.shutdown();

    let err = handle.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), "canceled");

    let err = coordinator.health_check().await.unwrap_err();
    assert_eq!(err.kind(), "canceled");
}

#[tokio::test]
async fn corrupt_artifact_is_an_error_and_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("check_ports_results.json");
    let runner = Arc::new(ScriptedRunner::exit(0, "", Some("[{\"port\":")));
    let coordinator = Coordinator::new(runner, shared_config(&dir));

    let err = coordinator.health_check().await.unwrap_err();
    assert_eq!(err.kind(), "artifact_corrupt");
    assert!(!artifact.exists());
}

#[tokio::test]
async fn shared_channel_serializes_runs() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(
        ScriptedRunner::exit(0, "", Some(r#"{"status":"ok"}"#))
            .with_delay(Duration::from_millis(30)),
    );
    let coordinator = Arc::new(Coordinator::new(runner.clone(), shared_config(&dir)));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let c = coordinator.clone();
        handles.push(tokio::spawn(async move {
            c.run_playbook(&playbook("deploy.yml")).await
        }));
    }
    for h in handles {
        let outcome = h.await.unwrap().unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                payload: json!({"status": "ok"})
            }
        );
    }

    assert_eq!(runner.max_active.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn per_invocation_channel_isolates_runs() {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(
        ScriptedRunner::exit(0, "", Some(r#"[1,2,3]"#)).with_delay(Duration::from_millis(30)),
    );
    let cfg = CoordinatorConfig {
        channel: ResultChannel::per_invocation(dir.path()),
        ..Default::default()
    };
    let coordinator = Arc::new(Coordinator::new(runner.clone(), cfg));

    let adhoc = playbook("a.yml");
    let (a, b) = tokio::join!(
        coordinator.run_playbook(&adhoc),
        coordinator.health_check()
    );
    assert_eq!(a.unwrap(), RunOutcome::Completed { payload: json!([1, 2, 3]) });
    assert_eq!(b.unwrap(), RunOutcome::Completed { payload: json!([1, 2, 3]) });

    let seen = runner.seen.lock().unwrap();
    assert_ne!(seen[0].1, seen[1].1);
    assert!(seen.iter().all(|(_, path, _)| path.starts_with(dir.path())));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn metrics_follow_run_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let metrics = Arc::new(RecordingMetrics::default());

    let ok = Coordinator::new(
        Arc::new(ScriptedRunner::exit(0, "", Some("[]"))),
        shared_config(&dir),
    )
    .with_metrics(metrics.clone());
    ok.health_check().await.unwrap();

    let failing = Coordinator::new(
        Arc::new(ScriptedRunner::exit(4, "unreachable", None)),
        shared_config(&dir),
    )
    .with_metrics(metrics.clone());
    failing.run_playbook(&playbook("deploy.yml")).await.unwrap();

    assert_eq!(
        metrics.events(),
        vec![
            "started:health_check",
            "artifact:health_check:consumed",
            "completed:health_check:success",
            "started:run_playbook",
            "completed:run_playbook:failure",
        ]
    );
}
