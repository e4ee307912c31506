use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use playgate_core::CoreError;
use playgate_model::PlaybookId;

/// Errors returned by [`crate::ApiHandler`] implementations.
///
/// Request-level rejections render as `{"error": <message>, "code": <CODE>}`.
/// Execution failures are normally shaped by [`crate::envelope`]; their
/// `IntoResponse` rendering is only a fallback for custom routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed body, missing field or invalid playbook identifier.
    #[error("{0}")]
    InvalidRequest(String),

    /// Playbook is valid but not in the configured allow-list.
    #[error("playbook '{0}' is not allowed")]
    NotAllowed(PlaybookId),

    /// The run itself failed before producing a process result.
    #[error(transparent)]
    Execution(CoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::NotAllowed(_) => "PLAYBOOK_NOT_ALLOWED",
            ApiError::Execution(_) => "EXECUTION_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotAllowed(_) => StatusCode::FORBIDDEN,
            ApiError::Execution(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAllowed(playbook) => ApiError::NotAllowed(playbook),
            other => ApiError::Execution(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        } else {
            warn!(code = self.code(), error = %self, "request rejected");
        }

        let body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        (status, Json(body)).into_response()
    }
}
