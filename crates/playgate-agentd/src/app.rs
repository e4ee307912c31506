use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use playgate_api::{CoordinatorAdapter, HttpApi};
use playgate_core::Coordinator;
use playgate_prometheus::PrometheusMetrics;

use crate::config::CorsOrigins;

/// Full service router: API routes, request tracing and CORS.
pub fn router(
    coordinator: Arc<Coordinator>,
    metrics: Option<PrometheusMetrics>,
    cors: &CorsOrigins,
) -> Router {
    let mut api = HttpApi::new(Arc::new(CoordinatorAdapter::new(coordinator)));
    if let Some(metrics) = metrics {
        api = api.with_metrics(metrics);
    }

    api.router()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(cors))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => CorsLayer::new()
            .allow_origin(list.clone())
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(3600)),
    }
}
