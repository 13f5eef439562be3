//! Project descriptor and profile alignment

use crate::audit::findings::Findings;
use crate::audit::loader::DocumentLoader;
use crate::audit::models::{Output, ProfilesConfig, ProjectConfig};
use crate::config::AuditSettings;
use crate::paths;

/// Check that `dbt_project.yml` and `profiles.yml` agree
///
/// Skips everything after loading if either document is missing or empty.
pub fn check_project_and_profile(
    loader: &DocumentLoader,
    settings: &AuditSettings,
    findings: &mut Findings,
) {
    let project_path = paths::project_file(loader.root());
    let profiles_path = paths::profiles_file(loader.root());

    let project = loader.load(&project_path, findings);
    let profiles = loader.load(&profiles_path, findings);

    let (Some(project), Some(profiles)) = (project, profiles) else {
        return;
    };
    if project.is_empty() || profiles.is_empty() {
        return;
    }

    let project = ProjectConfig::new(&project);
    let profiles = ProfilesConfig::new(&profiles);

    if project.name().is_none() {
        findings.problem("dbt_project.yml: 'name' is required");
    }
    let Some(profile_name) = project.profile() else {
        findings.problem("dbt_project.yml: 'profile' is required");
        return;
    };

    let Some(profile) = profiles.profile(&profile_name) else {
        findings.problem(format!(
            "profiles.yml: profile '{profile_name}' not found (profiles defined: {:?})",
            profiles.names()
        ));
        return;
    };

    if profile.outputs.is_empty() {
        findings.problem(format!("profiles.yml: profile '{profile_name}' has no outputs"));
    }
    if let Some(target) = &profile.target
        && !profile.has_output(target)
    {
        findings.problem(format!(
            "profiles.yml: target '{target}' not defined under outputs for profile '{profile_name}'"
        ));
    }

    for output in &profile.outputs {
        check_output(output, settings, findings);
    }
}

fn check_output(output: &Output, settings: &AuditSettings, findings: &mut Findings) {
    let expected = settings.expected_adapter.as_str();
    if output.adapter.as_deref() != Some(expected) {
        findings.warning(format!(
            "profiles.yml: output '{}' type is '{}', expected '{expected}' for this project",
            output.name,
            output.adapter.as_deref().unwrap_or("<unset>")
        ));
    }

    if output.method.as_deref() == Some("service-account")
        && output.keyfile.as_deref().is_some_and(|k| k.trim().is_empty())
    {
        findings.warning(format!(
            "profiles.yml: output '{}' uses service-account but keyfile is empty string; \
             set GOOGLE_APPLICATION_CREDENTIALS or use oauth target",
            output.name
        ));
    }
}
