use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::Response,
    routing::{get, post},
};
use tracing::debug;

use playgate_model::RunPlaybookRequest;

use crate::{envelope, error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    #[cfg(feature = "prometheus")]
    metrics: Option<playgate_prometheus::PrometheusMetrics>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            #[cfg(feature = "prometheus")]
            metrics: None,
        }
    }

    /// Also serve `GET /metrics` from `metrics`.
    #[cfg(feature = "prometheus")]
    pub fn with_metrics(mut self, metrics: playgate_prometheus::PrometheusMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the axum router.
    ///
    /// Routes:
    /// - POST /run_playbook - run a caller-chosen playbook
    /// - GET /healthCheck - run the health-check playbook
    /// - GET /metrics - Prometheus exposition (when configured)
    pub fn router(self) -> Router {
        let router = Router::new()
            .route("/run_playbook", post(run_playbook::<H>))
            .route("/healthCheck", get(health_check::<H>))
            .with_state(self.handler);

        #[cfg(feature = "prometheus")]
        let router = match self.metrics {
            Some(metrics) => router.merge(metrics::router(metrics)),
            None => router,
        };

        router
    }
}

/// POST /run_playbook
async fn run_playbook<H>(
    State(handler): State<Arc<H>>,
    body: Result<Json<RunPlaybookRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    H: ApiHandler,
{
    let Json(req) = body?;
    debug!(playbook = %req.playbook, "run_playbook requested");

    match handler.run_playbook(&req.playbook).await {
        Ok(outcome) => Ok(envelope::run_playbook(Ok(outcome))),
        Err(ApiError::Execution(err)) => Ok(envelope::run_playbook(Err(err))),
        Err(other) => Err(other),
    }
}

/// GET /healthCheck
async fn health_check<H>(State(handler): State<Arc<H>>) -> Result<Response, ApiError>
where
    H: ApiHandler,
{
    match handler.health_check().await {
        Ok(outcome) => Ok(envelope::health_check(Ok(outcome))),
        Err(ApiError::Execution(err)) => Ok(envelope::health_check(Err(err))),
        Err(other) => Err(other),
    }
}

#[cfg(feature = "prometheus")]
mod metrics {
    use axum::{
        Router,
        extract::State,
        http::header,
        response::{IntoResponse, Response},
        routing::get,
    };
    use playgate_prometheus::PrometheusMetrics;

    use crate::error::ApiError;

    pub(super) fn router(metrics: PrometheusMetrics) -> Router {
        Router::new()
            .route("/metrics", get(render))
            .with_state(metrics)
    }

    /// GET /metrics
    async fn render(State(metrics): State<PrometheusMetrics>) -> Result<Response, ApiError> {
        let body = metrics
            .encode_text()
            .map_err(|e| ApiError::Internal(format!("metrics encoding failed: {e}")))?;
        Ok(([(header::CONTENT_TYPE, metrics.content_type())], body).into_response())
    }
}
