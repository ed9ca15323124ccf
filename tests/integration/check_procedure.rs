//! Integration tests for locate + run + evaluate
//! The linter is a shell script placed on an injected search path

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::{Duration, Instant};

use lintgate::{ComplianceCheck, FailureKind, LintGateError, ReportFormat, RunnerConfig, Verdict};
use tempfile::TempDir;

struct Fixture {
    bin: TempDir,
    root: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            bin: TempDir::new().unwrap(),
            root: TempDir::new().unwrap(),
        }
    }

    fn with_linter(self, body: &str) -> Self {
        let path = self.bin.path().join("golangci-lint");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn config(&self) -> RunnerConfig {
        RunnerConfig::new(self.root.path()).with_search_path(self.bin.path().as_os_str())
    }

    fn run(&self) -> Result<Verdict, LintGateError> {
        ComplianceCheck::new(self.config()).run()
    }
}

#[test]
fn test_absent_tool_is_skipped_not_passed() {
    let fixture = Fixture::new();
    let verdict = fixture.run().unwrap();

    assert!(verdict.is_skip());
    assert!(!verdict.is_pass());
    assert!(verdict.failure().is_none());
}

#[test]
fn test_absent_tool_skips_before_checking_root() {
    let fixture = Fixture::new();
    let config = RunnerConfig::new(fixture.root.path().join("missing"))
        .with_search_path(fixture.bin.path().as_os_str());

    assert!(ComplianceCheck::new(config).run().unwrap().is_skip());
}

#[test]
fn test_clean_success_passes() {
    let fixture = Fixture::new().with_linter("exit 0");
    assert_eq!(fixture.run().unwrap(), Verdict::Pass);
}

#[test]
fn test_failure_reports_count_and_raw_output() {
    let fixture = Fixture::new().with_linter(
        "echo 'pkg/foo.go:12: Error: unused variable'\n\
         echo 'pkg/bar.go:3:9: Error return value is not checked (errcheck)' >&2\n\
         echo '2 issues:'\n\
         exit 1",
    );

    let verdict = fixture.run().unwrap();
    let failure = verdict.failure().expect("check should fail");

    assert_eq!(failure.kind, FailureKind::ToolReportedIssues);
    assert_eq!(failure.issue_count, 2);
    assert!(failure.output.contains("pkg/foo.go:12: Error: unused variable"));
    assert!(failure.output.contains("(errcheck)"));
    assert!(failure.to_string().contains("Found 2 linting issues"));
}

#[test]
fn test_failure_without_marker_lines_counts_zero() {
    let fixture = Fixture::new().with_linter("echo 'could not load packages'\nexit 5");

    let verdict = fixture.run().unwrap();
    let failure = verdict.failure().expect("exit status alone must fail");

    assert_eq!(failure.issue_count, 0);
    assert_eq!(failure.kind, FailureKind::ToolReportedIssues);
}

#[test]
fn test_success_with_summary_marker_fails() {
    let fixture = Fixture::new().with_linter("echo '1 issues:'\nexit 0");

    let verdict = fixture.run().unwrap();
    assert_eq!(verdict.failure().unwrap().kind, FailureKind::SummaryMismatch);
}

#[test]
fn test_missing_project_root_is_fatal() {
    let fixture = Fixture::new().with_linter("exit 0");
    let config = RunnerConfig::new(fixture.root.path().join("does-not-exist"))
        .with_search_path(fixture.bin.path().as_os_str());

    let err = ComplianceCheck::new(config).run().unwrap_err();
    assert!(matches!(err, LintGateError::ProjectRoot { .. }));
}

#[test]
fn test_file_as_project_root_is_fatal() {
    let fixture = Fixture::new().with_linter("exit 0");
    let file = fixture.root.path().join("main.go");
    fs::write(&file, "package main\n").unwrap();
    let config = RunnerConfig::new(&file).with_search_path(fixture.bin.path().as_os_str());

    let err = ComplianceCheck::new(config).run().unwrap_err();
    assert_eq!(err.code(), "ERR_PROJECT_ROOT");
}

#[test]
fn test_tool_runs_in_project_root() {
    let fixture = Fixture::new().with_linter(
        "[ -f .golangci.yml ] && exit 0\n\
         echo 'x.go:1: Error: wrong directory'\n\
         exit 1",
    );
    fs::write(fixture.root.path().join(".golangci.yml"), "linters: {}\n").unwrap();

    assert!(fixture.run().unwrap().is_pass());
}

#[test]
fn test_relative_tool_path_runs_from_other_root() {
    let tools = TempDir::new_in(".").unwrap();
    let root = TempDir::new().unwrap();
    let tool = tools.path().join("lint");
    fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    assert!(tool.is_relative());

    let config = RunnerConfig::new(root.path()).with_tool(tool.to_str().unwrap());
    assert_eq!(ComplianceCheck::new(config).run().unwrap(), Verdict::Pass);
}

#[test]
fn test_background_child_does_not_outlive_timeout() {
    let fixture = Fixture::new().with_linter("sleep 5 &\necho '1 issues:'\nexit 1");
    let config = fixture.config().with_timeout(Duration::from_millis(300));

    let started = Instant::now();
    let err = ComplianceCheck::new(config).run().unwrap_err();

    assert!(matches!(err, LintGateError::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn test_extra_args_follow_run() {
    let fixture = Fixture::new().with_linter(
        "[ \"$*\" = 'run --out-format json' ] && { echo '{\"Issues\":null}'; exit 0; }\n\
         echo \"a.go:1: Error: $*\"\n\
         exit 1",
    );
    let config = fixture
        .config()
        .with_args(["--out-format", "json"])
        .with_format(ReportFormat::Json);

    assert_eq!(ComplianceCheck::new(config).run().unwrap(), Verdict::Pass);
}

#[test]
fn test_hung_tool_times_out() {
    let fixture = Fixture::new().with_linter("exec sleep 30");
    let config = fixture.config().with_timeout(Duration::from_millis(300));

    let err = ComplianceCheck::new(config).run().unwrap_err();
    assert!(matches!(err, LintGateError::Timeout { .. }));
}

#[test]
fn test_project_config_file_is_honoured() {
    let fixture =
        Fixture::new().with_linter("echo 'a.go:1:1: printf: bad verb (govet)'\nexit 1");
    fs::write(
        fixture.root.path().join("lintgate.toml"),
        "[report]\nextra_markers = [\"(govet)\"]\n",
    )
    .unwrap();

    let file = lintgate::FileConfig::discover(fixture.root.path()).unwrap().unwrap();
    let config = fixture.config().apply_file(file);
    let verdict = ComplianceCheck::new(config).run().unwrap();

    assert_eq!(verdict.failure().unwrap().issue_count, 1);
}
