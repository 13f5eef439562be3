//! Pure API handlers
//!
//! These handlers contain the service logic and are HTTP-agnostic.

use crate::deploy::DeployWorker;

use super::error::ApiError;
use super::types::{HealthData, RunStartedData};

/// Acknowledgment text returned by `/run`
pub const RUN_STARTED_MESSAGE: &str = "dbt deployment started in background";

/// State shared by all handlers
#[derive(Debug)]
pub struct ServiceState {
    /// Service identity reported by the health endpoint
    pub service_name: String,
    /// Background deployment worker
    pub worker: DeployWorker,
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Service health plus the last execution status
#[must_use]
pub fn health(state: &ServiceState) -> HealthData {
    HealthData {
        status: "healthy",
        service: state.service_name.clone(),
        timestamp: now(),
        last_execution: state.worker.status(),
    }
}

/// Start a deployment in the background
///
/// Returns as soon as the worker is signalled; the outcome shows up later in
/// [`health`].
pub fn trigger_run(state: &ServiceState) -> Result<RunStartedData, ApiError> {
    state
        .worker
        .trigger()
        .map_err(|e| ApiError::internal(e.to_string()))?;
    log::info!("deployment triggered");

    Ok(RunStartedData {
        status: "started",
        message: RUN_STARTED_MESSAGE,
        timestamp: now(),
    })
}
