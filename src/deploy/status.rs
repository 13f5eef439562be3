//! Last-run execution status
//!
//! One record per process, overwritten by every run. The record lives in a
//! [`StatusCell`] so readers always see a whole record, never a torn one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// State of the most recent deployment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// The deployment is in progress
    Running,
    /// The deployment exited with code 0
    Success,
    /// The deployment failed, timed out or could not start
    Error,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Snapshot of the most recent deployment attempt
///
/// All fields are `null` until the first run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    /// When the run started (RFC3339)
    pub time: Option<String>,
    /// Current state
    pub status: Option<RunState>,
    /// Outcome detail
    pub message: Option<String>,
}

/// Shared, mutex-guarded [`ExecutionStatus`]
///
/// Cloning the cell shares the same record.
#[derive(Debug, Clone, Default)]
pub struct StatusCell {
    inner: Arc<Mutex<ExecutionStatus>>,
}

impl StatusCell {
    /// Create a cell holding an all-null record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current record
    #[must_use]
    pub fn snapshot(&self) -> ExecutionStatus {
        self.lock().clone()
    }

    /// Start a new run: stamp the time, clear the message
    pub fn mark_running(&self) {
        *self.lock() = ExecutionStatus {
            time: Some(chrono::Utc::now().to_rfc3339()),
            status: Some(RunState::Running),
            message: None,
        };
    }

    /// Finish the current run successfully
    pub fn mark_success(&self, message: impl Into<String>) {
        self.finish(RunState::Success, message.into());
    }

    /// Finish the current run with an error
    pub fn mark_error(&self, message: impl Into<String>) {
        self.finish(RunState::Error, message.into());
    }

    fn finish(&self, state: RunState, message: String) {
        let mut status = self.lock();
        status.status = Some(state);
        status.message = Some(message);
    }

    // A panic while holding the lock cannot leave the record half-written,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, ExecutionStatus> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
