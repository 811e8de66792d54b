//! Python script executor.
//!
//! Spawns the configured interpreter with the script path as its only
//! argument and classifies the exit status into an [`ExecutionResult`].

use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use super::executor::{ScriptError, ScriptExecutor, ScriptOutput};
use super::result::ExecutionResult;
use super::subprocess;

/// Interpreter used when none is configured.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Executor for Python source files.
#[derive(Debug, Clone)]
pub struct PythonExecutor {
    interpreter: String,
    /// Optional wall-clock bound. `None` waits for as long as the script runs.
    timeout: Option<Duration>,
}

impl PythonExecutor {
    pub fn new() -> Self {
        Self::with_interpreter(DEFAULT_INTERPRETER)
    }

    pub fn with_interpreter(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run the script and return the raw capture, or why it could not run.
    pub async fn execute(&self, script_path: &Path) -> Result<ScriptOutput, ScriptError> {
        check_script(script_path).await?;

        let mut cmd = tokio::process::Command::new(&self.interpreter);
        cmd.arg(script_path);
        subprocess::run_command(&mut cmd, self.timeout).await
    }
}

impl Default for PythonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptExecutor for PythonExecutor {
    async fn run(&self, script_path: &Path) -> ExecutionResult {
        tracing::info!(
            script = %script_path.display(),
            interpreter = %self.interpreter,
            "Executing script"
        );

        match self.execute(script_path).await {
            Ok(output) if output.exit_code == 0 => {
                tracing::info!(
                    duration_ms = output.duration_ms,
                    "Script execution completed successfully"
                );
                output.into()
            }
            Ok(output) => {
                tracing::error!(
                    exit_code = output.exit_code,
                    duration_ms = output.duration_ms,
                    "Script execution failed"
                );
                output.into()
            }
            Err(err) => {
                tracing::error!(error = %err, "Script could not be executed");
                err.into()
            }
        }
    }
}

/// Verify `path` is a regular file that can be opened for reading.
async fn check_script(path: &Path) -> Result<(), ScriptError> {
    let display = || path.display().to_string();

    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(ScriptError::NotFound(display())),
    }

    match tokio::fs::File::open(path).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(ScriptError::PermissionDenied(display()))
        }
        Err(_) => Err(ScriptError::NotFound(display())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
