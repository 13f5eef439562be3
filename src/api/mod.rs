//! HTTP-agnostic API layer
//!
//! Typed response structures and handlers that any HTTP server adapter can
//! call. The `tiny_http` adapter lives in [`crate::server`].
//!
//! ## Design
//!
//! - **Handlers are plain functions**: take [`ServiceState`], return data or `ApiError`
//! - **Types are framework-agnostic**: no HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorBody, ErrorCode};
pub use handlers::{RUN_STARTED_MESSAGE, ServiceState, health, trigger_run};
pub use types::{HealthData, RunStartedData};
