//! `execbridge-run` -- run one Python script from the command line.
//!
//! Uses the same executor as the HTTP bridge. On success the captured
//! stdout is printed; on any failure the reason is logged and the process
//! exits with status 1.
//!
//! # Environment variables
//!
//! | Variable     | Default                | Description                         |
//! |--------------|------------------------|-------------------------------------|
//! | `PYTHON_BIN` | `python3`              | Interpreter program                 |
//! | `LOG_FILE`   | `script_execution.log` | Log file; empty disables file output |

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use execbridge_core::scripting::executor::ScriptExecutor;
use execbridge_core::scripting::python::{PythonExecutor, DEFAULT_INTERPRETER};
use execbridge_core::telemetry;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "execbridge_core=info,execbridge_run=info";

/// Log file used when `LOG_FILE` is not set.
const DEFAULT_LOG_FILE: &str = "script_execution.log";

#[derive(Parser, Debug)]
#[command(
    name = "execbridge-run",
    about = "Execute a Python script and print its output",
    version
)]
struct Cli {
    /// Path to the Python script to execute.
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Interpreter used to run the script.
    #[arg(long, env = "PYTHON_BIN", default_value = DEFAULT_INTERPRETER, hide = true)]
    python_bin: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    // Usage errors exit with status 1 like any other failure.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let log_file = log_file_from_env();
    let _log_guard = telemetry::init(DEFAULT_LOG_FILTER, log_file.as_deref());

    let executor = PythonExecutor::with_interpreter(cli.python_bin);
    match executor.run(&cli.script).await.into_outcome() {
        Ok(output) => {
            println!("Script Output:");
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(script = %cli.script.display(), "Error output: {error}");
            ExitCode::FAILURE
        }
    }
}

/// `LOG_FILE`, defaulting to [`DEFAULT_LOG_FILE`]; an empty value disables file logging.
fn log_file_from_env() -> Option<PathBuf> {
    match std::env::var("LOG_FILE") {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v) => Some(PathBuf::from(v)),
        Err(_) => Some(PathBuf::from(DEFAULT_LOG_FILE)),
    }
}
