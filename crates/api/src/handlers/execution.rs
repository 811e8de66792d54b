//! Handlers for running submitted code.
//!
//! Both endpoints follow the same shape: stage the submission into its own
//! temporary directory, hand the path to the executor, and return the
//! executor's result. The staged directory is removed before the response
//! leaves the handler; if anything in between bails out early, dropping
//! the [`StagedScript`] removes it instead.

use axum::extract::{Multipart, State};
use axum::Json;
use execbridge_core::scripting::executor::ScriptExecutor;
use execbridge_core::scripting::result::ExecutionResult;
use execbridge_core::scripting::staging::{upload_file_name, StagedScript};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the uploaded script.
pub const UPLOAD_FIELD: &str = "script";

/// Request body for inline execution.
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    /// Python source to run. Not validated in any way.
    pub code: String,
}

/// POST /execute
///
/// Run inline source code.
pub async fn execute_code(
    State(state): State<AppState>,
    Json(request): Json<CodeRequest>,
) -> AppResult<Json<ExecutionResult>> {
    let staged = state.stager.stage_source(&request.code).await?;
    let result = run_staged(&state, staged).await;
    Ok(Json(result))
}

/// POST /execute-file
///
/// Run an uploaded `.py` file. The filename is checked before the body of
/// the file is read or anything is written to disk.
pub async fn execute_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ExecutionResult>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(AppError::BadRequest("Uploaded script has no filename".into()));
        };
        upload_file_name(&filename)?;

        let bytes = field.bytes().await?;

        let staged = state.stager.stage_upload(&filename, &bytes).await?;
        let result = run_staged(&state, staged).await;
        return Ok(Json(result));
    }

    Err(AppError::BadRequest(format!("Missing '{UPLOAD_FIELD}' file field")))
}

async fn run_staged(state: &AppState, staged: StagedScript) -> ExecutionResult {
    tracing::debug!(path = %staged.path().display(), "Script staged");
    let result = state.executor.run(staged.path()).await;

    if let Err(e) = staged.close() {
        tracing::warn!(error = %e, "Failed to remove staging directory");
    }
    result
}
