//! Integration tests for the test-harness assertions

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use lintgate::{ComplianceCheck, RunnerConfig, assert_check_clean};
use tempfile::TempDir;

fn check_with(bin: &Path, root: &Path, body: Option<&str>) -> ComplianceCheck {
    if let Some(body) = body {
        let path = bin.join("golangci-lint");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    ComplianceCheck::new(RunnerConfig::new(root).with_search_path(bin.as_os_str()))
}

#[test]
fn test_clean_project_does_not_panic() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    assert_check_clean(&check_with(bin.path(), root.path(), Some("exit 0")));
}

#[test]
fn test_missing_linter_does_not_panic() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    assert_check_clean(&check_with(bin.path(), root.path(), None));
}

#[test]
#[should_panic(expected = "Found 1 linting issues")]
fn test_reported_issue_panics_with_message() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let check = check_with(
        bin.path(),
        root.path(),
        Some("echo 'pkg/foo.go:12: Error: unused variable'\nexit 1"),
    );
    assert_check_clean(&check);
}

#[test]
#[should_panic(expected = "fatal: lintgate: ERR_PROJECT_ROOT")]
fn test_missing_root_panics_as_fatal() {
    let bin = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    let check = check_with(bin.path(), &root.path().join("gone"), Some("exit 0"));
    assert_check_clean(&check);
}

#[test]
fn test_check_project_reads_config_file() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("lintgate.toml"),
        "[tool]\nname = \"lintgate-test-tool-that-does-not-exist\"\n",
    )
    .unwrap();

    let verdict = lintgate::check_project(root.path()).unwrap();
    assert!(verdict.to_string().contains("lintgate-test-tool-that-does-not-exist"));
    assert!(verdict.is_skip());
}

#[test]
fn test_check_project_rejects_bad_config() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("lintgate.toml"), "[tool\n").unwrap();

    let err = lintgate::check_project(root.path()).unwrap_err();
    assert_eq!(err.code(), "ERR_CONFIG");
}
