//! Audit findings
//!
//! Findings are split into two severities: problems block, warnings advise.

use serde::{Deserialize, Serialize};

/// Accumulated results of one audit run
///
/// Both lists keep check execution order. Serializes to the two-key summary
/// `{"problems": [...], "warnings": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    /// Blocking issues
    pub problems: Vec<String>,
    /// Non-blocking advisories
    pub warnings: Vec<String>,
}

impl Findings {
    /// Create an empty set of findings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            problems: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a blocking problem
    pub fn problem(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("problem: {message}");
        self.problems.push(message);
    }

    /// Record a non-blocking warning
    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("warning: {message}");
        self.warnings.push(message);
    }

    /// Whether the audit passed (no problems, regardless of warnings)
    #[must_use]
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }

    /// Process exit code for these findings
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.passed())
    }
}
