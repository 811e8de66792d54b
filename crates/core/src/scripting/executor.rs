//! Script execution interface and the raw capture/error types behind it.
//!
//! [`ScriptExecutor::run`] is the contract the bridge relies on: it always
//! yields an [`ExecutionResult`] and never fails. The lower-level
//! [`ScriptOutput`] / [`ScriptError`] pair describes what actually happened
//! to the child process before classification.

use std::future::Future;
use std::path::Path;

use super::result::ExecutionResult;

/// Captured output from one child process.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Complete stdout, decoded as lossy UTF-8.
    pub stdout: String,
    /// Complete stderr, decoded as lossy UTF-8.
    pub stderr: String,
    /// Process exit code (`-1` if killed by signal).
    pub exit_code: i32,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Reasons a script could not be run to completion.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script path does not name an existing regular file.
    #[error("Script not found: {0}")]
    NotFound(String),

    /// The script file exists but cannot be opened for reading.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The configured execution bound elapsed and the child was killed.
    #[error("Script timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// Spawning or waiting on the interpreter failed.
    #[error("Failed to run interpreter '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a script file and reports a structured outcome.
///
/// Implementations must convert every fault into a failed
/// [`ExecutionResult`]; nothing escapes to the caller.
pub trait ScriptExecutor: Send + Sync {
    fn run(&self, script_path: &Path) -> impl Future<Output = ExecutionResult> + Send;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
