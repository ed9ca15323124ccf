//! Runner configuration
//!
//! Built in code with the `with_*` setters, or layered from a `lintgate.toml`
//! file via [`RunnerConfig::apply_file`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lintgate_core::LintGateError;
use lintgate_scanner::{IssueMarkers, ReportFormat};
use serde::Deserialize;

/// Linter invoked when none is configured
pub const DEFAULT_TOOL: &str = "golangci-lint";

/// Subcommand always passed first
pub const RUN_SUBCOMMAND: &str = "run";

/// Config file looked up in the project root
pub const CONFIG_FILE_NAME: &str = "lintgate.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub tool: String,
    /// Arguments appended after `run`
    pub extra_args: Vec<String>,
    pub project_root: PathBuf,
    pub format: ReportFormat,
    pub markers: IssueMarkers,
    /// `None` waits for the tool indefinitely
    pub timeout: Option<Duration>,
    /// Overrides `PATH` for tool discovery
    pub search_path: Option<OsString>,
}

impl RunnerConfig {
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            extra_args: Vec::new(),
            project_root: project_root.into(),
            format: ReportFormat::default(),
            markers: IssueMarkers::default(),
            timeout: None,
            search_path: None,
        }
    }

    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: IssueMarkers) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Full argument list: `run` followed by the extra arguments
    #[must_use]
    pub fn command_args(&self) -> Vec<String> {
        std::iter::once(RUN_SUBCOMMAND.to_string())
            .chain(self.extra_args.iter().cloned())
            .collect()
    }

    /// Overlay the values a config file sets
    #[must_use]
    pub fn apply_file(mut self, file: FileConfig) -> Self {
        if let Some(tool) = file.tool {
            if let Some(name) = tool.name {
                self.tool = name;
            }
            if let Some(args) = tool.args {
                self.extra_args = args;
            }
            if let Some(secs) = tool.timeout_secs {
                self.timeout = Some(Duration::from_secs(secs));
            }
        }
        if let Some(report) = file.report {
            if let Some(format) = report.format {
                self.format = format;
            }
            if let Some(extra) = report.extra_markers {
                self.markers = IssueMarkers::new().with_extra(extra);
            }
        }
        self
    }
}

/// On-disk shape of `lintgate.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub tool: Option<ToolSection>,
    pub report: Option<ReportSection>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolSection {
    pub name: Option<String>,
    pub args: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub format: Option<ReportFormat>,
    pub extra_markers: Option<Vec<String>>,
}

impl FileConfig {
    /// Load and parse a config file
    ///
    /// # Errors
    ///
    /// Returns `LintGateError::Config` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, LintGateError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LintGateError::config(path, e))?;
        Self::parse(&content).map_err(|e| LintGateError::config(path, e))
    }

    /// Load `lintgate.toml` from `root` if it exists
    ///
    /// # Errors
    ///
    /// Returns `LintGateError::Config` if the file exists but is invalid
    pub fn discover(root: &Path) -> Result<Option<Self>, LintGateError> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse config text
    ///
    /// # Errors
    ///
    /// Returns the TOML error if `content` is not a valid config
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
