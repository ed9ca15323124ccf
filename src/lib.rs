//! Lintgate - lint-compliance checks for test suites
//!
//! Runs an external linter (golangci-lint by default) against a project root
//! and reports pass, fail or skip. Meant to be called from a `#[test]`:
//!
//! ```no_run
//! #[test]
//! fn linting_compliance() {
//!     lintgate::assert_lint_clean(env!("CARGO_MANIFEST_DIR"));
//! }
//! ```

use std::path::Path;

pub use lintgate_core::{Failure, FailureKind, LintGateError, ToolOutput, Verdict};
pub use lintgate_runner::{ComplianceCheck, FileConfig, RunnerConfig, ToolLocator};
pub use lintgate_scanner::{IssueMarkers, ReportFormat, count_issues, has_issue_summary};

/// Check `root` with the default configuration plus its `lintgate.toml`, if any
///
/// # Errors
///
/// Returns `LintGateError` when the check cannot complete (missing project
/// root, invalid config, tool that fails to start)
pub fn check_project(root: impl AsRef<Path>) -> Result<Verdict, LintGateError> {
    let root = root.as_ref();
    let mut config = RunnerConfig::new(root);
    if let Some(file) = FileConfig::discover(root)? {
        config = config.apply_file(file);
    }
    ComplianceCheck::new(config).run()
}

/// Assert that `root` passes the linter
///
/// A missing linter is reported on stderr as `test skipped: <reason>` and the
/// assertion returns, so the test harness shows it as passed. Stable Rust
/// tests have no way to mark themselves skipped; call [`check_project`] and
/// match on [`Verdict::Skip`] when skip must be told apart from pass.
///
/// # Panics
///
/// Panics with the linter output if the check fails, and with a `fatal:`
/// message if it cannot run at all.
pub fn assert_lint_clean(root: impl AsRef<Path>) {
    assert_verdict(check_project(root));
}

/// Assert on the result of an already configured check
///
/// # Panics
///
/// Same conditions as [`assert_lint_clean`]
pub fn assert_check_clean(check: &ComplianceCheck) {
    assert_verdict(check.run());
}

fn assert_verdict(result: Result<Verdict, LintGateError>) {
    match result {
        Ok(Verdict::Pass) => {}
        Ok(Verdict::Skip { reason }) => eprintln!("{}", skip_notice(&reason)),
        Ok(Verdict::Fail(failure)) => panic!("{failure}"),
        Err(e) => panic!("fatal: {e}"),
    }
}

fn skip_notice(reason: &str) -> String {
    format!("test skipped: {reason}")
}
