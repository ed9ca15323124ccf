//! The compliance check procedure

use std::path::PathBuf;

use lintgate_core::{Failure, FailureKind, LintGateError, ToolOutput, Verdict};
use lintgate_scanner::{ReportFormat, has_issue_summary, parse_json_report};
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::exec::run_tool;
use crate::locate::ToolLocator;

/// One-shot lint-compliance check of a project
#[derive(Debug, Clone)]
pub struct ComplianceCheck {
    config: RunnerConfig,
}

impl ComplianceCheck {
    #[must_use]
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run the linter against the project root and judge the result
    ///
    /// A missing tool yields `Verdict::Skip`, never a pass.
    ///
    /// # Errors
    ///
    /// Returns `LintGateError` for conditions that abort the check: an
    /// unusable project root, a tool that fails to start or times out, or an
    /// unreadable JSON report after a successful run.
    pub fn run(&self) -> Result<Verdict, LintGateError> {
        let mut locator = ToolLocator::new(&self.config.tool);
        if let Some(search_path) = &self.config.search_path {
            locator = locator.with_search_path(search_path.clone());
        }

        let Some(program) = locator.locate() else {
            warn!(tool = %self.config.tool, "linter not found, skipping");
            return Ok(Verdict::skip(format!(
                "{} not found, skipping linting check",
                self.config.tool
            )));
        };
        debug!(tool = %program.display(), "linter located");

        let root = self.enter_project_root()?;
        let output = run_tool(
            &program,
            &self.config.command_args(),
            &root,
            self.config.timeout,
        )?;

        let verdict = self.evaluate(&output)?;
        match &verdict {
            Verdict::Fail(failure) => {
                info!(issues = failure.issue_count, kind = ?failure.kind, "lint check failed");
            }
            Verdict::Pass | Verdict::Skip { .. } => info!(%verdict, "lint check finished"),
        }
        Ok(verdict)
    }

    /// Judge captured output without running anything
    ///
    /// # Errors
    ///
    /// Returns `LintGateError::Report` in JSON mode when a successful run
    /// did not print a readable report.
    pub fn evaluate(&self, output: &ToolOutput) -> Result<Verdict, LintGateError> {
        match self.config.format {
            ReportFormat::Text => Ok(self.evaluate_text(output)),
            ReportFormat::Json => self.evaluate_json(output),
        }
    }

    fn evaluate_text(&self, output: &ToolOutput) -> Verdict {
        let issue_count = self.config.markers.count(&output.text);

        // Exit status alone decides failure; the count is diagnostic only
        if !output.success {
            return fail(FailureKind::ToolReportedIssues, issue_count, output);
        }

        if has_issue_summary(&output.text) {
            return fail(FailureKind::SummaryMismatch, issue_count, output);
        }

        Verdict::Pass
    }

    fn evaluate_json(&self, output: &ToolOutput) -> Result<Verdict, LintGateError> {
        if !output.success {
            // A failing tool may not have printed a report at all
            let issue_count = parse_json_report(&output.text).map_or_else(
                |_| self.config.markers.count(&output.text),
                |report| report.issue_count(),
            );
            return Ok(fail(FailureKind::ToolReportedIssues, issue_count, output));
        }

        let report = parse_json_report(&output.text)?;
        if report.issue_count() > 0 {
            return Ok(fail(FailureKind::SummaryMismatch, report.issue_count(), output));
        }

        Ok(Verdict::Pass)
    }

    fn enter_project_root(&self) -> Result<PathBuf, LintGateError> {
        let root = &self.config.project_root;
        let canonical = root
            .canonicalize()
            .map_err(|e| LintGateError::project_root(root, e))?;

        if !canonical.is_dir() {
            return Err(LintGateError::project_root(
                root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }

        debug!(root = %canonical.display(), "entering project root");
        Ok(canonical)
    }
}

fn fail(kind: FailureKind, issue_count: usize, output: &ToolOutput) -> Verdict {
    Verdict::Fail(Failure {
        kind,
        issue_count,
        output: output.text.clone(),
    })
}
