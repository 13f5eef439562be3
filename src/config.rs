//! dbt-ops settings
//!
//! Settings are read from an optional `dbt-ops.toml` at the project root.
//! Every field has a default, so a project without the file behaves exactly
//! like one with an empty file.
//!
//! ```toml
//! [audit]
//! expected_adapter = "bigquery"
//!
//! [deploy]
//! service_name = "dbt-transformer"
//! command = "./deploy.sh"
//! args = ["prod", "run"]
//! timeout_secs = 1200
//!
//! [deploy.env]
//! DBT_TARGET = "prod"
//! BIGQUERY_DATASET = "transformer_dbt_prod"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deploy::LaunchSpec;
use crate::paths;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Settings file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The settings file is not valid TOML for [`Settings`]
    #[error("invalid settings in {path}: {source}")]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
}

/// Top-level dbt-ops settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Config auditor settings
    #[serde(default)]
    pub audit: AuditSettings,
    /// Deploy trigger service settings
    #[serde(default)]
    pub deploy: DeploySettings,
}

/// Config auditor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSettings {
    /// The only output `type` this project expects in `profiles.yml`
    #[serde(default = "default_expected_adapter")]
    pub expected_adapter: String,
}

fn default_expected_adapter() -> String {
    "bigquery".to_string()
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            expected_adapter: default_expected_adapter(),
        }
    }
}

/// Deploy trigger service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySettings {
    /// Service identity reported by the health endpoint
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Deployment program
    #[serde(default = "default_command")]
    pub command: String,
    /// Positional arguments (environment name, action name)
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Variables layered over the inherited environment
    #[serde(default = "default_env")]
    pub env: BTreeMap<String, String>,
    /// Hard wall-clock bound for one deployment
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_service_name() -> String {
    "dbt-transformer".to_string()
}

fn default_command() -> String {
    "./deploy.sh".to_string()
}

fn default_args() -> Vec<String> {
    vec!["prod".to_string(), "run".to_string()]
}

fn default_env() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("DBT_TARGET".to_string(), "prod".to_string()),
        ("BIGQUERY_DATASET".to_string(), "transformer_dbt_prod".to_string()),
    ])
}

const fn default_timeout_secs() -> u64 {
    1200
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            command: default_command(),
            args: default_args(),
            env: default_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl DeploySettings {
    /// Build the launch description for one deployment run
    #[must_use]
    pub fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec {
            program: self.command.clone(),
            args: self.args.clone(),
            env: self.env.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl Settings {
    /// Load settings for a project root, or defaults if `dbt-ops.toml` is absent
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = paths::settings_file(root);
        if !path.exists() {
            log::debug!("no {} found, using defaults", paths::SETTINGS_FILE);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
