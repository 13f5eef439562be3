//! Config auditor
//!
//! Static, credential-free checks over a dbt project's YAML files:
//!
//! 1. `dbt_project.yml` / `profiles.yml` alignment (name, profile, target)
//! 2. directories declared in `dbt_project.yml`
//! 3. `models/schema.yml` structure
//! 4. `models/sources.yml` structure
//!
//! The auditor never fails: unreadable input becomes a finding. Callers decide
//! what to do with the [`Findings`].

pub mod checks;
mod findings;
pub mod loader;
pub mod models;

use std::path::Path;

pub use findings::Findings;
pub use loader::DocumentLoader;

use crate::config::AuditSettings;

/// Run every check against the project at `root`
///
/// Each call starts from empty findings and reads the files afresh, so
/// repeated runs on an unchanged tree give identical results.
#[must_use]
pub fn run_audit(root: &Path, settings: &AuditSettings) -> Findings {
    log::info!("auditing dbt project at {}", root.display());

    let loader = DocumentLoader::new(root);
    let mut findings = Findings::new();

    checks::check_project_and_profile(&loader, settings, &mut findings);
    checks::check_paths(&loader, &mut findings);
    checks::check_models_schema(&loader, &mut findings);
    checks::check_sources(&loader, &mut findings);

    log::info!(
        "audit finished: {} problem(s), {} warning(s)",
        findings.problems.len(),
        findings.warnings.len()
    );
    findings
}
