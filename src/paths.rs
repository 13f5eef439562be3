//! Centralized path definitions for dbt-ops
//!
//! All files the auditor and the service look at are resolved relative to a
//! project root.
//!
//! ## Project Layout
//!
//! ```text
//! project/
//! ├── dbt_project.yml        # project descriptor
//! ├── profiles.yml           # connection profiles
//! ├── dbt-ops.toml           # optional dbt-ops settings
//! └── models/
//!     ├── schema.yml         # model schema
//!     └── sources.yml        # source declarations
//! ```

use std::path::{Path, PathBuf};

/// Project descriptor filename
pub const PROJECT_FILE: &str = "dbt_project.yml";

/// Profiles filename
pub const PROFILES_FILE: &str = "profiles.yml";

/// Settings filename
pub const SETTINGS_FILE: &str = "dbt-ops.toml";

/// Models directory
const MODELS_DIR: &str = "models";

/// Model schema filename (inside `models/`)
const SCHEMA_FILE: &str = "schema.yml";

/// Sources filename (inside `models/`)
const SOURCES_FILE: &str = "sources.yml";

/// Get path to `dbt_project.yml`.
#[must_use]
pub fn project_file(root: &Path) -> PathBuf {
    root.join(PROJECT_FILE)
}

/// Get path to `profiles.yml`.
#[must_use]
pub fn profiles_file(root: &Path) -> PathBuf {
    root.join(PROFILES_FILE)
}

/// Get path to `models/schema.yml`.
#[must_use]
pub fn schema_file(root: &Path) -> PathBuf {
    root.join(MODELS_DIR).join(SCHEMA_FILE)
}

/// Get path to `models/sources.yml`.
#[must_use]
pub fn sources_file(root: &Path) -> PathBuf {
    root.join(MODELS_DIR).join(SOURCES_FILE)
}

/// Get path to `dbt-ops.toml`.
#[must_use]
pub fn settings_file(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// Render `path` relative to `root` for messages.
///
/// Falls back to the full path when `path` is not under `root`. Separators are
/// normalized to `/` so messages read the same on every platform.
#[must_use]
pub fn display_relative(root: &Path, path: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
