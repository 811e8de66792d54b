//! Process-wide logging setup shared by the server and the CLI.
//!
//! [`init`] is called once from each binary's `main` before anything else
//! logs. It installs a stderr layer and, when a log file is given, a
//! non-blocking file layer. The returned guard must be held until shutdown;
//! dropping it flushes the file writer.

use std::ffi::OsStr;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `default_filter` applies when `RUST_LOG`
/// is not set. Returns the file writer guard, if any.
pub fn init(default_filter: &str, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = match log_file.map(file_writer) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

/// Append-only writer for `path`.
fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let (dir, file_name) = split_log_path(path);
    let appender = tracing_appender::rolling::never(dir, file_name);
    tracing_appender::non_blocking(appender)
}

/// Directory and file name of a log path; a bare name resolves against the CWD.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().unwrap_or(path.as_os_str());
    (dir, file_name)
}
