#![allow(dead_code)]

use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use playgate_api::{CoordinatorAdapter, HttpApi};
use playgate_core::{Coordinator, CoordinatorConfig, Invocation, ResultChannel, Runner, RunnerError};
use playgate_model::ProcessOutput;

/// Stand-in for the playbook executable.
pub enum FakeRunner {
    /// Write `artifact` (if any) to the run's result path and exit with `code`.
    Exit {
        code: i32,
        stderr: &'static str,
        artifact: Option<&'static str>,
    },
    /// Run until canceled.
    Hang,
}

impl FakeRunner {
    pub fn ok(artifact: Option<&'static str>) -> Self {
        FakeRunner::Exit {
            code: 0,
            stderr: "",
            artifact,
        }
    }

    pub fn fail(code: i32, stderr: &'static str) -> Self {
        FakeRunner::Exit {
            code,
            stderr,
            artifact: None,
        }
    }
}

#[async_trait]
impl Runner for FakeRunner {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn run(
        &self,
        invocation: &Invocation,
        cancel: CancellationToken,
    ) -> Result<ProcessOutput, RunnerError> {
        match self {
            FakeRunner::Exit {
                code,
                stderr,
                artifact,
            } => {
                if let Some(body) = artifact {
                    tokio::fs::write(invocation.result_path(), body).await?;
                }
                Ok(ProcessOutput::new(*code, "PLAY RECAP", *stderr))
            }
            FakeRunner::Hang => {
                cancel.cancelled().await;
                Err(RunnerError::Canceled)
            }
        }
    }
}

/// Coordinator config using `<dir>/check_ports_results.json` as shared artifact.
pub fn shared_config(dir: &Path) -> CoordinatorConfig {
    CoordinatorConfig {
        channel: ResultChannel::shared(dir.join("check_ports_results.json")),
        timeout_ms: Some(5_000),
        ..Default::default()
    }
}

pub fn build_app(runner: FakeRunner, config: CoordinatorConfig) -> Router {
    let coordinator = Arc::new(Coordinator::new(Arc::new(runner), config));
    HttpApi::new(Arc::new(CoordinatorAdapter::new(coordinator))).router()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub const SHORT: Duration = Duration::from_millis(50);
