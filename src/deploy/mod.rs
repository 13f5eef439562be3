//! Deploy trigger service core
//!
//! - [`launcher`] runs the external deployment command with a hard timeout
//! - [`status`] holds the last-run [`ExecutionStatus`]
//! - [`worker`] runs deployments on a dedicated background thread

pub mod launcher;
pub mod status;
pub mod worker;

pub use launcher::{LaunchError, LaunchOutput, LaunchSpec, Launcher, ProcessLauncher};
pub use status::{ExecutionStatus, RunState, StatusCell};
pub use worker::{DeployJob, DeployWorker, SUCCESS_MESSAGE, TriggerError};
