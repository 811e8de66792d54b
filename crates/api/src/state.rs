use std::sync::Arc;

use execbridge_core::scripting::python::PythonExecutor;
use execbridge_core::scripting::staging::ScriptStager;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds no per-request data; every execution is independent.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Creates the scoped directory each submission is written into.
    pub stager: Arc<ScriptStager>,
    /// Runs staged scripts.
    pub executor: Arc<PythonExecutor>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let stager = ScriptStager::new(config.staging_dir.clone());
        let executor = PythonExecutor::with_interpreter(config.python_bin.clone())
            .with_timeout(config.execution_timeout);

        Self {
            config: Arc::new(config),
            stager: Arc::new(stager),
            executor: Arc::new(executor),
        }
    }
}
