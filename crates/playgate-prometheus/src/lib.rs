//! Prometheus metrics backend for playgate runs.
//!
//! [`PrometheusMetrics`] implements [`playgate_core::MetricsBackend`]; hand it to
//! the coordinator and serve [`PrometheusMetrics::encode_text`] from `/metrics`.
//!
//! ```rust
//! use std::sync::Arc;
//! use playgate_core::MetricsBackend;
//! use playgate_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let handle: Arc<dyn MetricsBackend> = Arc::new(metrics.clone());
//!
//! handle.record_run_started("health_check");
//! assert!(metrics.encode_text()?.contains("playgate_runs_started_total"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `playgate_runs_started_total{operation}` - Counter
//! - `playgate_runs_completed_total{operation, status}` - Counter
//! - `playgate_run_duration_seconds{operation}` - Histogram
//! - `playgate_run_errors_total{operation, error_kind}` - Counter
//! - `playgate_artifacts_total{operation, state}` - Counter

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Registry, TextEncoder};
