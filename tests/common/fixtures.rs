//! Test fixtures and builders
//!
//! Provides a builder for on-disk dbt project trees and stub launchers for
//! the deploy service.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::Receiver;

use dbt_ops::deploy::{LaunchError, LaunchOutput, LaunchSpec, Launcher};
use tempfile::TempDir;

pub const PROJECT_YML: &str = r#"name: transformer
version: "1.0.0"
profile: transformer
model-paths: ["models"]
macro-paths: ["macros"]
"#;

pub const PROFILES_YML: &str = r"transformer:
  target: dev
  outputs:
    dev:
      type: bigquery
      method: oauth
      project: analytics-dev
      dataset: transformer_dbt_dev
    prod:
      type: bigquery
      method: service-account
      keyfile: /secrets/key.json
      project: analytics-prod
      dataset: transformer_dbt_prod
";

pub const SCHEMA_YML: &str = r"version: 2
models:
  - name: orders
    columns:
      - name: order_id
        tests: [unique, not_null]
      - name: status
        tests:
          - accepted_values:
              values: [placed, shipped, returned]
";

pub const SOURCES_YML: &str = r"version: 2
sources:
  - name: raw
    database: analytics-prod
    tables:
      - name: orders
";

/// Builder for a dbt project tree in a temporary directory
pub struct ProjectBuilder {
    files: BTreeMap<String, Option<String>>,
    dirs: Vec<String>,
}

impl ProjectBuilder {
    /// A fully valid project
    pub fn new() -> Self {
        let files = [
            ("dbt_project.yml", PROJECT_YML),
            ("profiles.yml", PROFILES_YML),
            ("models/schema.yml", SCHEMA_YML),
            ("models/sources.yml", SOURCES_YML),
        ]
        .into_iter()
        .map(|(path, content)| (path.to_string(), Some(content.to_string())))
        .collect();

        Self {
            files,
            dirs: vec!["models".to_string(), "macros".to_string()],
        }
    }

    /// Replace or add a file
    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), Some(content.to_string()));
        self
    }

    /// Leave a file out of the tree
    pub fn without(mut self, path: &str) -> Self {
        self.files.insert(path.to_string(), None);
        self
    }

    /// Leave a directory out of the tree
    pub fn without_dir(mut self, dir: &str) -> Self {
        self.dirs.retain(|d| d != dir);
        self
    }

    pub fn build(self) -> TempDir {
        let temp = TempDir::new().unwrap();
        for dir in &self.dirs {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        for (path, content) in &self.files {
            if let Some(content) = content {
                write_file(temp.path(), path, content);
            }
        }
        temp
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Launcher that returns a fixed outcome
#[derive(Debug)]
pub struct FixedLauncher {
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl FixedLauncher {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            stderr: String::new(),
        }
    }

    pub fn failure(stderr: &str) -> Self {
        Self {
            exit_code: Some(1),
            stderr: stderr.to_string(),
        }
    }
}

impl Launcher for FixedLauncher {
    fn launch(&self, _spec: &LaunchSpec) -> Result<LaunchOutput, LaunchError> {
        Ok(LaunchOutput {
            exit_code: self.exit_code,
            stdout: String::new(),
            stderr: self.stderr.clone(),
        })
    }
}

/// Launcher that blocks until released, then succeeds
#[derive(Debug)]
pub struct GatedLauncher {
    gate: Mutex<Receiver<()>>,
}

impl GatedLauncher {
    pub fn new(gate: Receiver<()>) -> Self {
        Self {
            gate: Mutex::new(gate),
        }
    }
}

impl Launcher for GatedLauncher {
    fn launch(&self, _spec: &LaunchSpec) -> Result<LaunchOutput, LaunchError> {
        let _ = self.gate.lock().unwrap().recv();
        Ok(LaunchOutput {
            exit_code: Some(0),
            ..LaunchOutput::default()
        })
    }
}
