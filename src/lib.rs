//! dbt-ops - operational tooling for a dbt data-transformation project
//!
//! This library provides the two halves of the `dbt-ops` binary: a static
//! configuration auditor for the project's YAML files, and a small HTTP
//! service that triggers the deployment script in the background and reports
//! its last outcome.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod audit;
pub mod config;
pub mod deploy;
pub mod output;
pub mod paths;
pub mod server;
