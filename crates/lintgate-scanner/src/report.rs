//! Structured linter reports
//!
//! golangci-lint can print its findings as JSON (`--out-format json` in v1,
//! `--output.json.path stdout` in v2). Counting `Issues` entries is exact
//! where the line heuristic is only a guess.

use std::fmt;
use std::str::FromStr;

use lintgate_core::LintGateError;
use serde::Deserialize;

/// How the captured output is interpreted
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Line heuristic over free-form text
    #[default]
    Text,
    /// golangci-lint JSON document
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format `{other}` (expected text or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonReport {
    /// golangci-lint writes `null` when nothing was found
    #[serde(default)]
    issues: Option<Vec<JsonIssue>>,
}

impl JsonReport {
    #[must_use]
    pub fn issues(&self) -> &[JsonIssue] {
        self.issues.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonIssue {
    pub from_linter: String,
    pub text: String,
    #[serde(default)]
    pub severity: String,
    pub pos: JsonPosition,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonPosition {
    pub filename: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl fmt::Display for JsonIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} ({})",
            self.pos.filename, self.pos.line, self.pos.column, self.text, self.from_linter
        )
    }
}

/// Parse the first JSON document in `output`
///
/// Combined output can carry log lines before the document, so anything
/// ahead of the first `{` is ignored.
///
/// # Errors
///
/// Returns `LintGateError::Report` if no document is present or it does not parse
pub fn parse_json_report(output: &str) -> Result<JsonReport, LintGateError> {
    let start = output
        .find('{')
        .ok_or_else(|| LintGateError::report("no JSON document in linter output"))?;

    serde_json::Deserializer::from_str(&output[start..])
        .into_iter::<JsonReport>()
        .next()
        .ok_or_else(|| LintGateError::report("no JSON document in linter output"))?
        .map_err(|e| LintGateError::report(format!("invalid JSON report: {e}")))
}
