use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use execbridge_core::scripting::python::DEFAULT_INTERPRETER;

/// Frontend origins allowed by default.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,https://localhost:3000,\
http://localhost:8000,https://localhost:8443,https://gauntlet-daily-challenge-phi.vercel.app";

/// Directories searched for `cert.pem` / `key.pem`, in order.
pub const DEFAULT_CERT_DIRS: &str = "/certs,certs";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`), shared by HTTP and HTTPS mode.
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// Directories probed for TLS material, parsed from `CERT_DIRS`.
    pub cert_dirs: Vec<PathBuf>,
    /// Time allowed for in-flight requests to drain on shutdown (HTTPS mode).
    pub shutdown_timeout_secs: u64,
    /// Interpreter program used to run scripts.
    pub python_bin: String,
    /// Optional execution bound; `None` means scripts run until they exit.
    pub execution_timeout: Option<Duration>,
    /// Parent directory for per-request staging directories (OS temp dir if `None`).
    pub staging_dir: Option<PathBuf>,
    /// Request body limit in bytes; `None` disables the limit.
    pub max_body_bytes: Option<usize>,
    /// Log file written alongside stderr; `None` disables file logging.
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `HOST`                   | `0.0.0.0`               |
    /// | `PORT`                   | `8000`                  |
    /// | `CORS_ORIGINS`           | local + hosted frontend |
    /// | `CERT_DIRS`              | `/certs,certs`          |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                    |
    /// | `PYTHON_BIN`             | `python3`               |
    /// | `EXECUTION_TIMEOUT_SECS` | unset (unbounded)       |
    /// | `STAGING_DIR`            | OS temp dir             |
    /// | `MAX_BODY_BYTES`         | unset (unlimited)       |
    /// | `LOG_FILE`               | `api_execution.log`     |
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = get("HOST", "0.0.0.0");
        let port: u16 = parse_required("PORT", &get("PORT", "8000"));
        let cors_origins = split_list(&get("CORS_ORIGINS", DEFAULT_CORS_ORIGINS));
        let cert_dirs = split_list(&get("CERT_DIRS", DEFAULT_CERT_DIRS))
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let shutdown_timeout_secs: u64 =
            parse_required("SHUTDOWN_TIMEOUT_SECS", &get("SHUTDOWN_TIMEOUT_SECS", "30"));
        let python_bin = get("PYTHON_BIN", DEFAULT_INTERPRETER);

        let execution_timeout = non_empty(lookup("EXECUTION_TIMEOUT_SECS"))
            .map(|v| Duration::from_secs(parse_required("EXECUTION_TIMEOUT_SECS", &v)));
        let staging_dir = non_empty(lookup("STAGING_DIR")).map(PathBuf::from);
        let max_body_bytes =
            non_empty(lookup("MAX_BODY_BYTES")).map(|v| parse_required("MAX_BODY_BYTES", &v));
        // An explicitly empty LOG_FILE turns file logging off.
        let log_file = match lookup("LOG_FILE") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(PathBuf::from(v)),
            None => Some(PathBuf::from("api_execution.log")),
        };

        Self {
            host,
            port,
            cors_origins,
            cert_dirs,
            shutdown_timeout_secs,
            python_bin,
            execution_timeout,
            staging_dir,
            max_body_bytes,
            log_file,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_required<T: FromStr>(key: &str, raw: &str) -> T {
    raw.trim()
        .parse()
        .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
