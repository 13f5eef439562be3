//! Background deployment worker
//!
//! Triggers are sent over a channel to one dedicated worker thread, so the
//! caller never waits on the deployment and runs never race on the status
//! record. At most one trigger waits behind the running deployment; further
//! triggers fold into it.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread;

use thiserror::Error;

use super::launcher::{LaunchSpec, Launcher};
use super::status::{ExecutionStatus, StatusCell};

/// Status message for a successful deployment
pub const SUCCESS_MESSAGE: &str = "Deployment completed successfully";

/// How much captured standard error a failed run keeps
pub const STDERR_TAIL_CHARS: usize = 500;

/// The last `max` characters of `text`
#[must_use]
pub fn tail_chars(text: &str, max: usize) -> &str {
    if max == 0 {
        return "";
    }
    match text.char_indices().rev().nth(max - 1) {
        Some((start, _)) => &text[start..],
        None => text,
    }
}

/// One deployment, runnable any number of times
#[derive(Debug, Clone)]
pub struct DeployJob {
    launcher: Arc<dyn Launcher>,
    spec: LaunchSpec,
    status: StatusCell,
}

impl DeployJob {
    /// Create a job that reports into `status`
    #[must_use]
    pub fn new(launcher: Arc<dyn Launcher>, spec: LaunchSpec, status: StatusCell) -> Self {
        Self {
            launcher,
            spec,
            status,
        }
    }

    /// Run the deployment to completion, recording the outcome
    ///
    /// Never fails: every outcome lands in the status record.
    pub fn run(&self) {
        log::info!("starting deployment: {}", self.spec.command_line());
        self.status.mark_running();

        match self.launcher.launch(&self.spec) {
            Ok(output) if output.success() => {
                log::info!("deployment completed successfully");
                self.status.mark_success(SUCCESS_MESSAGE);
            },
            Ok(output) => {
                log::error!(
                    "deployment failed (exit code {:?}): {}",
                    output.exit_code,
                    output.stderr.trim_end()
                );
                self.status.mark_error(tail_chars(&output.stderr, STDERR_TAIL_CHARS));
            },
            Err(e) => {
                log::error!("error running deployment: {e}");
                self.status.mark_error(e.to_string());
            },
        }
    }
}

/// Trigger failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// The worker thread is gone and can take no more jobs
    #[error("deployment worker is not running")]
    WorkerStopped,
}

/// Handle to the dedicated deployment thread
#[derive(Debug)]
pub struct DeployWorker {
    sender: SyncSender<()>,
    status: StatusCell,
}

impl DeployWorker {
    /// Start the worker thread for `job`
    pub fn spawn(job: DeployJob) -> io::Result<Self> {
        let (sender, receiver) = mpsc::sync_channel::<()>(1);
        let status = job.status.clone();

        thread::Builder::new()
            .name("deploy-worker".to_string())
            .spawn(move || {
                for () in receiver {
                    job.run();
                }
                log::debug!("deploy worker stopped");
            })?;

        Ok(Self { sender, status })
    }

    /// Request a deployment and return immediately
    ///
    /// If a deployment is already waiting to start, this request is covered
    /// by it and nothing new is queued.
    pub fn trigger(&self) -> Result<(), TriggerError> {
        match self.sender.try_send(()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(())) => {
                log::debug!("deployment already pending, trigger coalesced");
                Ok(())
            },
            Err(TrySendError::Disconnected(())) => Err(TriggerError::WorkerStopped),
        }
    }

    /// Current status record
    #[must_use]
    pub fn status(&self) -> ExecutionStatus {
        self.status.snapshot()
    }
}
