//! `models/schema.yml` structure

use crate::audit::findings::Findings;
use crate::audit::loader::DocumentLoader;
use crate::audit::models::SchemaSpec;
use crate::paths;

/// Check `models/schema.yml`
///
/// A missing file is reported by the loader and the content checks are
/// skipped; an empty file is skipped silently.
pub fn check_models_schema(loader: &DocumentLoader, findings: &mut Findings) {
    let path = paths::schema_file(loader.root());
    let Some(doc) = loader.load(&path, findings) else {
        return;
    };
    if doc.is_empty() {
        return;
    }
    let schema = SchemaSpec::new(&doc);

    if !schema.has_version_two() {
        findings.warning("models/schema.yml: 'version: 2' is recommended");
    }
    if schema.models().is_none() {
        findings.problem("models/schema.yml: 'models' should be a list");
        return;
    }

    for test in schema.column_tests() {
        let Some(accepted) = test.accepted_values() else {
            continue;
        };
        if accepted.contains_key("arguments") && !accepted.contains_key("values") {
            findings.problem(format!(
                "models/schema.yml: model '{}' column '{}': 'accepted_values' should be \
                 'values: [...]' (not under 'arguments')",
                test.model.unwrap_or("<unnamed>"),
                test.column.unwrap_or("<unnamed>")
            ));
        }
    }
}
