//! Core types for lintgate
//!
//! Every check ends in a [`Verdict`] or a fatal [`LintGateError`]; the two never mix.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Captured result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Combined stdout and stderr, in the order the tool wrote them
    pub text: String,
    pub success: bool,
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl ToolOutput {
    #[must_use]
    pub fn new(text: impl Into<String>, success: bool, code: Option<i32>) -> Self {
        Self {
            text: text.into(),
            success,
            code,
        }
    }

    #[must_use]
    pub fn succeeded(text: impl Into<String>) -> Self {
        Self::new(text, true, Some(0))
    }

    #[must_use]
    pub fn failed(text: impl Into<String>, code: i32) -> Self {
        Self::new(text, false, Some(code))
    }
}

/// Why a check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The tool exited with a failure status
    ToolReportedIssues,
    /// The tool exited successfully but its output still carries an issue summary
    SummaryMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    /// Best-effort count; zero does not mean the check passed
    pub issue_count: usize,
    pub output: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::ToolReportedIssues => write!(
                f,
                "Found {} linting issues. All linting issues must be fixed.\nOutput:\n{}",
                self.issue_count, self.output
            ),
            FailureKind::SummaryMismatch => write!(
                f,
                "Linter exited successfully but its output reports issues ({} counted).\nOutput:\n{}",
                self.issue_count, self.output
            ),
        }
    }
}

/// Outcome of a compliance check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// The check could not run; this is not a pass
    Skip { reason: String },
    Fail(Failure),
}

impl Verdict {
    #[must_use]
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skip { .. })
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Fail(failure) => Some(failure),
            Self::Pass | Self::Skip { .. } => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => f.write_str("passed"),
            Self::Skip { reason } => write!(f, "skipped: {reason}"),
            Self::Fail(failure) => write!(f, "failed: {failure}"),
        }
    }
}

/// Fatal conditions that abort a check instead of producing a verdict
#[derive(thiserror::Error, Debug)]
pub enum LintGateError {
    #[error("lintgate: ERR_PROJECT_ROOT: cannot enter {}: {source}", .path.display())]
    ProjectRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lintgate: ERR_SPAWN: failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("lintgate: ERR_CAPTURE: failed to read tool output: {source}")]
    Capture {
        #[source]
        source: std::io::Error,
    },

    #[error("lintgate: ERR_TIMEOUT: {tool} did not finish within {}s", .after.as_secs_f64())]
    Timeout { tool: String, after: Duration },

    #[error("lintgate: ERR_CONFIG: {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("lintgate: ERR_REPORT: {message}")]
    Report { message: String },
}

impl LintGateError {
    #[must_use]
    pub fn project_root(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ProjectRoot {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn config(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn report(message: impl fmt::Display) -> Self {
        Self::Report {
            message: message.to_string(),
        }
    }

    /// Short machine-readable code, matching the `ERR_*` tag in the message
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ProjectRoot { .. } => "ERR_PROJECT_ROOT",
            Self::Spawn { .. } => "ERR_SPAWN",
            Self::Capture { .. } => "ERR_CAPTURE",
            Self::Timeout { .. } => "ERR_TIMEOUT",
            Self::Config { .. } => "ERR_CONFIG",
            Self::Report { .. } => "ERR_REPORT",
        }
    }
}
