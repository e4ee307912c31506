//! Metrics collection abstraction for coordinator runs.
//!
//! Backends (prometheus, ...) implement [`MetricsBackend`] and are handed to the
//! [`crate::Coordinator`]. Without one, [`noop_metrics`] is used.
mod backend;
pub use backend::{MetricsBackend, MetricsHandle, RunStatus};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
