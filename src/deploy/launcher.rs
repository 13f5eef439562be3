//! External process launching
//!
//! The deployment command is described by a [`LaunchSpec`] and executed
//! through the [`Launcher`] trait, so the service can be exercised without
//! spawning real processes.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// How often a running child is polled for exit
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Everything needed to run the external command once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Program to execute
    pub program: String,
    /// Positional arguments
    pub args: Vec<String>,
    /// Variables layered over the inherited environment
    pub env: BTreeMap<String, String>,
    /// Hard wall-clock bound
    pub timeout: Duration,
}

impl LaunchSpec {
    /// Program and arguments joined for display
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a process that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOutput {
    /// Exit code; `None` if the process was ended by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl LaunchOutput {
    /// Whether the process exited with code 0
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Reasons a launch produced no [`LaunchOutput`]
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The process could not be started
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Underlying I/O error
        source: io::Error,
    },
    /// Waiting on the process failed
    #[error("failed to wait for `{command}`: {source}")]
    Wait {
        /// Command line being waited on
        command: String,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The process outlived its timeout and was killed
    #[error("`{command}` timed out after {} seconds", .timeout.as_secs())]
    Timeout {
        /// Command line that timed out
        command: String,
        /// The bound that was exceeded
        timeout: Duration,
    },
}

/// Capability to run an external command to completion
pub trait Launcher: Send + Sync + fmt::Debug {
    /// Run the command, blocking until it exits or times out
    fn launch(&self, spec: &LaunchSpec) -> Result<LaunchOutput, LaunchError>;
}

/// [`Launcher`] backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, spec: &LaunchSpec) -> Result<LaunchOutput, LaunchError> {
        let command = spec.command_line();
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Drain both pipes while waiting so a chatty child cannot block on a
        // full pipe buffer.
        let stdout = child.stdout.take().map(read_to_string_in_background);
        let stderr = child.stderr.take().map(read_to_string_in_background);

        let deadline = Instant::now() + spec.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    log::warn!("`{command}` exceeded {:?}, killing it", spec.timeout);
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(LaunchError::Timeout {
                        command,
                        timeout: spec.timeout,
                    });
                },
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(source) => {
                    let _ = child.kill();
                    return Err(LaunchError::Wait { command, source });
                },
            }
        };

        // A grandchild that inherited the pipes can hold them open after the
        // child exits; the deadline covers the reads too.
        let (Some(stdout), Some(stderr)) = (
            collect_output(stdout, deadline),
            collect_output(stderr, deadline),
        ) else {
            log::warn!("`{command}` left its output open past {:?}", spec.timeout);
            return Err(LaunchError::Timeout {
                command,
                timeout: spec.timeout,
            });
        };

        Ok(LaunchOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}

fn read_to_string_in_background<R: Read + Send + 'static>(mut reader: R) -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = sender.send(String::from_utf8_lossy(&buf).into_owned());
    });
    receiver
}

/// Wait for a reader to finish; `None` if the deadline passes first
fn collect_output(receiver: Option<Receiver<String>>, deadline: Instant) -> Option<String> {
    let Some(receiver) = receiver else {
        return Some(String::new());
    };
    match receiver.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(output) => Some(output),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}
