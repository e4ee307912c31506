//! HTTP surface of the playgate service.
//!
//! [`HttpApi`] mounts `POST /run_playbook` and `GET /healthCheck` on top of any
//! [`ApiHandler`]; [`CoordinatorAdapter`] is the stock handler backed by a
//! [`playgate_core::Coordinator`].
mod adapter;
pub use adapter::CoordinatorAdapter;

pub mod envelope;

mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod http;
pub use http::HttpApi;
