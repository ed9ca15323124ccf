//! Tool invocation with combined output capture

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use lintgate_core::{LintGateError, ToolOutput};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Run `program` in `cwd` and capture stdout and stderr through one pipe
///
/// Without a timeout this blocks until the tool exits.
///
/// # Errors
///
/// Returns `LintGateError::Spawn` if the process cannot start,
/// `LintGateError::Capture` if reading its output fails and
/// `LintGateError::Timeout` if it, or a process still holding its output
/// pipe, outlives `timeout` (the child is killed).
pub fn run_tool(
    program: &Path,
    args: &[String],
    cwd: &Path,
    timeout: Option<Duration>,
) -> Result<ToolOutput, LintGateError> {
    let tool = program.display().to_string();
    let (mut reader, writer) = std::io::pipe().map_err(capture_error)?;

    debug!(tool = %tool, ?args, cwd = %cwd.display(), "spawning linter");

    // The temporary Command owns the parent's write ends and drops them here,
    // so the reader sees EOF once the child exits.
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(writer.try_clone().map_err(capture_error)?)
        .stderr(writer)
        .spawn()
        .map_err(|source| LintGateError::Spawn {
            tool: tool.clone(),
            source,
        })?;

    let Some(limit) = timeout else {
        let mut bytes = Vec::new();
        let read = reader.read_to_end(&mut bytes);
        let status = child.wait().map_err(capture_error)?;
        read.map_err(capture_error)?;
        return Ok(into_output(&bytes, status));
    };

    let deadline = Instant::now() + limit;
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut bytes = Vec::new();
        // The receiver is gone once the check has timed out
        let _ = sender.send(reader.read_to_end(&mut bytes).map(|_| bytes));
    });

    let Some(status) = wait_until(&mut child, deadline)? else {
        warn!(tool = %tool, timeout_secs = limit.as_secs_f64(), "linter timed out, killing it");
        reap(&mut child);
        return Err(LintGateError::Timeout { tool, after: limit });
    };

    // Background processes started by the tool can hold the pipe open
    let remaining = deadline.saturating_duration_since(Instant::now());
    let bytes = match receiver.recv_timeout(remaining) {
        Ok(read) => read.map_err(capture_error)?,
        Err(RecvTimeoutError::Timeout) => {
            warn!(tool = %tool, "linter exited but its output pipe stayed open");
            return Err(LintGateError::Timeout { tool, after: limit });
        }
        Err(RecvTimeoutError::Disconnected) => {
            return Err(capture_error(std::io::Error::other("output reader panicked")));
        }
    };

    Ok(into_output(&bytes, status))
}

fn wait_until(
    child: &mut Child,
    deadline: Instant,
) -> Result<Option<std::process::ExitStatus>, LintGateError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {}
            Err(e) => {
                reap(child);
                return Err(capture_error(e));
            }
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Kill the child and collect its status
fn reap(child: &mut Child) {
    // The child may have exited between the last poll and the kill
    let _ = child.kill();
    let _ = child.wait();
}

fn into_output(bytes: &[u8], status: std::process::ExitStatus) -> ToolOutput {
    let text = String::from_utf8_lossy(bytes).to_string();
    debug!(code = ?status.code(), bytes = bytes.len(), "linter finished");
    ToolOutput::new(text, status.success(), status.code())
}

fn capture_error(source: std::io::Error) -> LintGateError {
    LintGateError::Capture { source }
}
