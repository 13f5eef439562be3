//! Declared directory existence

use crate::audit::findings::Findings;
use crate::audit::loader::DocumentLoader;
use crate::audit::models::ProjectConfig;
use crate::paths as project_paths;

/// Path-list keys in `dbt_project.yml` and whether each is required
pub const PATH_KEYS: [(&str, bool); 6] = [
    ("model-paths", true),
    ("analysis-paths", false),
    ("test-paths", false),
    ("seed-paths", false),
    ("macro-paths", false),
    ("snapshot-paths", false),
];

/// Check path lists in `dbt_project.yml`
///
/// A required list that is missing or empty is a problem. A declared path
/// that is not a directory yet is only a warning.
pub fn check_paths(loader: &DocumentLoader, findings: &mut Findings) {
    let project_path = project_paths::project_file(loader.root());
    let Some(project) = loader.load(&project_path, findings) else {
        return;
    };
    if project.is_empty() {
        return;
    }
    let project = ProjectConfig::new(&project);

    for (key, required) in PATH_KEYS {
        let declared = project.path_list(key);
        if required && declared.is_empty() {
            findings.problem(format!("dbt_project.yml: '{key}' missing or empty"));
        }

        for path in &declared {
            if !loader.root().join(path).is_dir() {
                findings.warning(format!(
                    "Path '{path}' (from {key}) does not exist yet; create if needed"
                ));
            }
        }
    }
}
