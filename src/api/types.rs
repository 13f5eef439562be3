//! API response types
//!
//! All types are framework-agnostic and serialize to the documented bodies.

use serde::Serialize;

use crate::deploy::ExecutionStatus;

/// `GET /` response body
#[derive(Debug, Serialize)]
pub struct HealthData {
    /// Always `"healthy"`
    pub status: &'static str,
    /// Service identity
    pub service: String,
    /// Response time (RFC3339)
    pub timestamp: String,
    /// Most recent deployment attempt
    pub last_execution: ExecutionStatus,
}

/// `/run` response body
#[derive(Debug, Serialize)]
pub struct RunStartedData {
    /// Always `"started"`
    pub status: &'static str,
    /// Fixed acknowledgment text
    pub message: &'static str,
    /// Trigger time (RFC3339)
    pub timestamp: String,
}
