//! `models/sources.yml` structure

use crate::audit::findings::Findings;
use crate::audit::loader::DocumentLoader;
use crate::audit::models::{SourcesSpec, source_has_database, source_name};
use crate::paths;

/// Check `models/sources.yml`
pub fn check_sources(loader: &DocumentLoader, findings: &mut Findings) {
    let path = paths::sources_file(loader.root());
    let Some(doc) = loader.load(&path, findings) else {
        return;
    };
    if doc.is_empty() {
        return;
    }
    let spec = SourcesSpec::new(&doc);

    if !spec.has_version_two() {
        findings.warning("models/sources.yml: 'version: 2' is recommended");
    }
    let sources = match spec.sources() {
        Some(sources) if !sources.is_empty() => sources,
        _ => {
            findings.problem("models/sources.yml: at least one source should be defined");
            return;
        },
    };

    for source in sources.iter().filter(|s| !source_has_database(s)) {
        findings.warning(format!(
            "models/sources.yml: source '{}' has no 'database' (BigQuery project); \
             explicit database is recommended",
            source_name(source).as_deref().unwrap_or("<unnamed>")
        ));
    }
}
