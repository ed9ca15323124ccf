//! Lintgate runner
//!
//! Finds the linter, runs it in the project root and turns its output into a
//! [`Verdict`](lintgate_core::Verdict).

pub mod check;
pub mod config;
pub mod exec;
pub mod locate;

pub use check::ComplianceCheck;
pub use config::{CONFIG_FILE_NAME, DEFAULT_TOOL, FileConfig, RUN_SUBCOMMAND, RunnerConfig};
pub use exec::run_tool;
pub use locate::ToolLocator;
