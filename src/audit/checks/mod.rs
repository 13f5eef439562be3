//! The four audit check groups
//!
//! Each check is independent: it loads what it needs through the shared
//! [`DocumentLoader`](super::loader::DocumentLoader) and records into the
//! shared [`Findings`](super::findings::Findings). No check can fail the run
//! by itself; it can only add findings.

mod paths;
mod project;
mod schema;
mod sources;

pub use paths::{PATH_KEYS, check_paths};
pub use project::check_project_and_profile;
pub use schema::check_models_schema;
pub use sources::check_sources;
