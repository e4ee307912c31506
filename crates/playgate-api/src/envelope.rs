//! Response envelopes of the two endpoints.
//!
//! | outcome | `/run_playbook` | `/healthCheck` |
//! |---|---|---|
//! | completed | payload as-is, 200 | `{responses: payload, errors: []}`, 200 |
//! | nonzero exit | `{returncode, stderr, stdout}`, 500 | `{responses: [], errors: [stderr]}`, 500 |
//! | no process result | `{returncode: null, stderr, stdout: "", reason}`, 500 | `{responses: [], errors: [message]}`, 500 |
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use playgate_core::CoreError;
use playgate_model::{ProcessOutput, RunOutcome};

/// Failure body of `/run_playbook`.
#[derive(Debug, Serialize, PartialEq)]
pub struct RunFailure {
    pub returncode: Option<i32>,
    pub stderr: String,
    pub stdout: String,
    /// Set only when the runner produced no exit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl From<ProcessOutput> for RunFailure {
    fn from(output: ProcessOutput) -> Self {
        Self {
            returncode: Some(output.exit_code),
            stderr: output.stderr,
            stdout: output.stdout,
            reason: None,
        }
    }
}

impl From<&CoreError> for RunFailure {
    fn from(err: &CoreError) -> Self {
        Self {
            returncode: None,
            stderr: err.to_string(),
            stdout: String::new(),
            reason: Some(err.kind()),
        }
    }
}

/// Body of `/healthCheck`.
#[derive(Debug, Serialize, PartialEq)]
pub struct HealthReport {
    pub responses: Value,
    pub errors: Vec<String>,
}

impl HealthReport {
    fn ok(responses: Value) -> Self {
        Self {
            responses,
            errors: Vec::new(),
        }
    }

    fn failed(error: String) -> Self {
        Self {
            responses: Value::Array(Vec::new()),
            errors: vec![error],
        }
    }
}

/// Shape a `/run_playbook` result.
pub fn run_playbook(result: Result<RunOutcome, CoreError>) -> Response {
    match result {
        Ok(RunOutcome::Completed { payload }) => (StatusCode::OK, Json(payload)).into_response(),
        Ok(RunOutcome::Failed(output)) => failure(RunFailure::from(output)),
        Err(err) => failure(RunFailure::from(&err)),
    }
}

/// Shape a `/healthCheck` result.
pub fn health_check(result: Result<RunOutcome, CoreError>) -> Response {
    match result {
        Ok(RunOutcome::Completed { payload }) => {
            (StatusCode::OK, Json(HealthReport::ok(payload))).into_response()
        }
        Ok(RunOutcome::Failed(output)) => failure(HealthReport::failed(output.stderr)),
        Err(err) => failure(HealthReport::failed(err.to_string())),
    }
}

fn failure<T: Serialize>(body: T) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
