//! Integration tests for the dbt-ops CLI
//!
//! These tests run the real binary against project trees on disk, and the
//! HTTP adapter against a live listener.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

mod server_test;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;

use common::fixtures::ProjectBuilder;

/// Helper function to create a dbt-ops command
fn dbt_ops() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("dbt-ops"))
}

// =============================================================================
// AUDIT
// =============================================================================

#[test]
fn test_audit_valid_project_passes() {
    let temp = ProjectBuilder::new().build();

    dbt_ops()
        .args(["audit", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("DBT SETUP AUDIT REPORT"))
        .stdout(predicate::str::contains("No blocking issues found."))
        .stdout(predicate::str::contains("JSON:"))
        .stdout(predicate::str::contains("Advisories:").not());
}

#[test]
fn test_audit_is_default_command() {
    let temp = ProjectBuilder::new().build();

    dbt_ops()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No blocking issues found."));
}

#[test]
fn test_audit_problem_exits_one() {
    let temp = ProjectBuilder::new().without("profiles.yml").build();

    dbt_ops()
        .args(["audit", "--root"])
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Blocking issues:"))
        .stdout(predicate::str::contains("- [ERROR] Missing file: profiles.yml"));
}

#[test]
fn test_audit_warnings_still_pass() {
    let temp = ProjectBuilder::new().without_dir("macros").build();

    dbt_ops()
        .args(["audit", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Advisories:"))
        .stdout(predicate::str::contains("- [WARN] Path 'macros' (from macro-paths)"));
}

#[test]
fn test_audit_json_mode() {
    let temp = ProjectBuilder::new()
        .file(
            "models/sources.yml",
            "version: 2\nsources:\n  - name: events\n",
        )
        .build();

    let output = dbt_ops()
        .args(["--json", "audit", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["problems"], serde_json::json!([]));
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_audit_invalid_settings_fails() {
    let temp = ProjectBuilder::new().build();
    fs::write(temp.path().join("dbt-ops.toml"), "[audit\n").unwrap();

    dbt_ops()
        .args(["audit", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("dbt-ops.toml"));
}

// =============================================================================
// VERSION
// =============================================================================

#[test]
fn test_version() {
    dbt_ops()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbt-ops v"));
}

#[test]
fn test_version_json() {
    dbt_ops()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}
