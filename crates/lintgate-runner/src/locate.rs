//! Executable lookup on the search path

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolves a program name the way a shell would
#[derive(Debug, Clone)]
pub struct ToolLocator {
    program: String,
    /// Overrides `PATH` when set
    search_path: Option<OsString>,
}

impl ToolLocator {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            search_path: None,
        }
    }

    #[must_use]
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Find the executable, or `None` if it is not installed
    ///
    /// The returned path is absolute, so it stays valid when the tool is
    /// started from another working directory.
    #[must_use]
    pub fn locate(&self) -> Option<PathBuf> {
        if self.program.is_empty() {
            return None;
        }

        // Explicit paths bypass the search path, as in execvp
        if self.program.contains(std::path::is_separator) {
            let candidate = std::path::absolute(&self.program).ok()?;
            return is_executable(&candidate).then_some(candidate);
        }

        let search_path = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))?;

        std::env::split_paths(&search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| candidates(&dir, &self.program))
            .filter_map(|candidate| std::path::absolute(candidate).ok())
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(format!("{program}.exe")), dir.join(program)]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
