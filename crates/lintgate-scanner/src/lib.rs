//! Output classification for lintgate
//!
//! Turns the captured text of a linter run into an issue count. The default
//! heuristic is line based: a line is an issue when it has a colon and one of
//! the known markers. [`report`] reads golangci-lint style JSON instead.

pub mod lexer;
pub mod report;

pub use lexer::{LineMarkers, Marker, MarkerLexer};
pub use report::{JsonIssue, JsonReport, ReportFormat, parse_json_report};

/// Literal that golangci-lint prints in front of a non-zero issue summary
pub const ISSUE_SUMMARY: &str = "issues:";

/// Marker set used by the line heuristic
///
/// The built-in markers (`Error`, `errcheck`, `staticcheck`) are always
/// active; `extra` adds plain substrings on top of them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IssueMarkers {
    extra: Vec<String>,
}

impl IssueMarkers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_extra<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(
            markers
                .into_iter()
                .map(Into::into)
                .filter(|marker: &String| !marker.is_empty()),
        );
        self
    }

    #[must_use]
    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    /// Whether `line` counts as one reportable issue
    #[must_use]
    pub fn is_issue_line(&self, line: &str) -> bool {
        let markers = LineMarkers::scan(line);
        markers.colon
            && (markers.issue_marker || self.extra.iter().any(|m| line.contains(m.as_str())))
    }

    /// Count issue lines in the trimmed output
    #[must_use]
    pub fn count(&self, output: &str) -> usize {
        output
            .trim()
            .split('\n')
            .filter(|line| self.is_issue_line(line))
            .count()
    }
}

/// Count issue lines with the built-in markers only
#[must_use]
pub fn count_issues(output: &str) -> usize {
    IssueMarkers::default().count(output)
}

/// Whether the output carries a non-zero issue summary
#[must_use]
pub fn has_issue_summary(output: &str) -> bool {
    output.contains(ISSUE_SUMMARY)
}
