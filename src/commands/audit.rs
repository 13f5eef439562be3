//! Audit the dbt project configuration

use std::path::Path;

use dbt_ops::audit::run_audit;
use dbt_ops::config::Settings;
use dbt_ops::output::OutputMode;

/// Run the auditor and exit non-zero if any problem was found
pub fn audit(root: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let settings = Settings::load(root)?;
    let findings = run_audit(root, &settings.audit);
    findings.render(mode);

    if !findings.passed() {
        std::process::exit(findings.exit_code());
    }
    Ok(())
}
