//! YAML document loading
//!
//! Load failures never escape: a missing or malformed file becomes a problem
//! and the caller sees `None`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use super::findings::Findings;
use crate::paths;

/// Loads YAML documents relative to a project root
///
/// Every call reads the file afresh, so a file loaded by two checks reports
/// its load problem twice.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    root: PathBuf,
}

impl DocumentLoader {
    /// Create a loader for a project root
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root this loader resolves against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a document, recording a problem on failure
    ///
    /// Returns `None` if the file is missing or unparsable. An empty document
    /// loads as an empty mapping.
    pub fn load(&self, path: &Path, findings: &mut Findings) -> Option<Mapping> {
        let shown = paths::display_relative(&self.root, path);

        if !path.exists() {
            findings.problem(format!("Missing file: {shown}"));
            return None;
        }

        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| parse_document(&content));

        match parsed {
            Ok(doc) => {
                log::debug!("loaded {shown}");
                Some(doc)
            },
            Err(e) => {
                findings.problem(format!("Failed to parse YAML: {shown} ({e})"));
                None
            },
        }
    }
}

/// Parse YAML text into a top-level mapping
///
/// An empty, comment-only or null document is an empty mapping; any other
/// non-mapping top level is an error.
pub fn parse_document(content: &str) -> Result<Mapping, String> {
    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if blank {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        other => Err(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        )),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
