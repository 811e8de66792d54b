//! Spawn-and-capture plumbing shared by executors.
//!
//! [`run_command`] takes a fully configured [`tokio::process::Command`],
//! drains stdout and stderr independently, and waits for exit, optionally
//! bounded by a timeout.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ScriptError, ScriptOutput};

/// Spawn `cmd`, capture both output streams as text and wait for exit.
///
/// With `timeout == None` the wait is unbounded. Stdin is closed so a script
/// reading from it sees EOF instead of hanging on the server's stdin.
pub async fn run_command(
    cmd: &mut Command,
    timeout: Option<Duration>,
) -> Result<ScriptOutput, ScriptError> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();

    // `kill_on_drop(true)`: the child never outlives the future waiting on it,
    // and therefore never outlives the staging directory of its request.
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|source| ScriptError::Io {
        program: program.clone(),
        source,
    })?;

    // Drain both pipes concurrently so a child filling one of them cannot
    // block while we wait on the other.
    let stdout_task = tokio::spawn(read_stream(child.stdout.take()));
    let stderr_task = tokio::spawn(read_stream(child.stderr.take()));

    let waited = match timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait()).await.ok(),
        None => Some(child.wait().await),
    };

    let Some(waited) = waited else {
        // Reap the child explicitly; the reader tasks finish once the pipes close.
        let _ = child.kill().await;
        return Err(ScriptError::Timeout {
            elapsed_ms: start.elapsed().as_millis() as u64,
        });
    };
    let status = waited.map_err(|source| ScriptError::Io { program, source })?;

    let duration_ms = start.elapsed().as_millis() as u64;
    let stdout = stdout_task.await.unwrap_or_default();
    let stderr = stderr_task.await.unwrap_or_default();

    Ok(ScriptOutput {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code: status.code().unwrap_or(-1),
        duration_ms,
    })
}

/// Read an entire output stream into a byte buffer.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = h.read_to_end(&mut buf).await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[tokio::test]
    async fn captures_streams_separately() {
        let output = run_command(&mut sh("echo out; echo err >&2"), None)
            .await
            .expect("run");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[tokio::test]
    async fn reports_nonzero_exit_code() {
        let output = run_command(&mut sh("exit 7"), None).await.expect("run");
        assert_eq!(output.exit_code, 7);
    }

    #[tokio::test]
    async fn stdin_is_closed() {
        let output = run_command(&mut sh("cat; echo done"), None)
            .await
            .expect("run");
        assert_eq!(output.stdout, "done\n");
    }

    #[tokio::test]
    async fn large_output_on_both_pipes_does_not_deadlock() {
        let script = "i=0; while [ $i -lt 20000 ]; do \
            echo xxxxxxxxxxxxxxxx; echo yyyyyyyyyyyyyyyy >&2; i=$((i+1)); done";
        let output = run_command(&mut sh(script), None).await.expect("run");
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.lines().count(), 20000);
        assert_eq!(output.stderr.lines().count(), 20000);
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let mut cmd = Command::new("/nonexistent/interpreter");
        let result = run_command(&mut cmd, None).await;
        assert_matches!(
            result,
            Err(ScriptError::Io { program, .. }) if program == "/nonexistent/interpreter"
        );
    }

    #[tokio::test]
    async fn timeout_kills_child() {
        let result = run_command(&mut sh("sleep 30"), Some(Duration::from_millis(200))).await;
        assert_matches!(result, Err(ScriptError::Timeout { elapsed_ms }) if elapsed_ms < 30_000);
    }
}
