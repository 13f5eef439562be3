//! Output formatting for human and JSON modes
//!
//! The audit report renders either as the fixed human-readable layout
//! (followed by the JSON summary) or as the JSON summary alone.

use std::fmt::Write as _;

use crate::audit::Findings;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

impl Findings {
    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.human_report()),
            OutputMode::Json => println!("{}", self.json_summary()),
        }
    }

    /// The full human-readable report, ending with the JSON summary
    #[must_use]
    pub fn human_report(&self) -> String {
        let mut out = String::new();
        out.push_str("DBT SETUP AUDIT REPORT\n========================\n\n");

        if self.problems.is_empty() {
            out.push_str("No blocking issues found.\n\n");
        } else {
            out.push_str("Blocking issues:\n");
            for p in &self.problems {
                let _ = writeln!(out, "- [ERROR] {p}");
            }
            out.push('\n');
        }

        if !self.warnings.is_empty() {
            out.push_str("Advisories:\n");
            for w in &self.warnings {
                let _ = writeln!(out, "- [WARN] {w}");
            }
            out.push('\n');
        }

        out.push_str("JSON:\n");
        out.push_str(&self.json_summary());
        out.push('\n');
        out
    }

    /// Pretty-printed `{"problems": [...], "warnings": [...]}`
    #[must_use]
    pub fn json_summary(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
