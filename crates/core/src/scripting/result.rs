//! The structured outcome returned to callers of the executor.

use serde::{Deserialize, Serialize};

use super::executor::{ScriptError, ScriptOutput};

/// Outcome of one script execution.
///
/// Exactly one of `output` / `error` is populated, selected by `success`.
/// Fields are private so the invariant can only be established through
/// [`ExecutionResult::succeeded`] and [`ExecutionResult::failed`].
/// Deserialization goes through the same check and rejects any other shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResultFields")]
pub struct ExecutionResult {
    success: bool,
    output: Option<String>,
    error: Option<String>,
}

impl ExecutionResult {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Captured stdout of a successful run.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Stderr of a failed run, or a description of why it could not run.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Consume the result, yielding `Ok(output)` or `Err(error)`.
    pub fn into_outcome(self) -> Result<String, String> {
        if self.success {
            Ok(self.output.unwrap_or_default())
        } else {
            Err(self.error.unwrap_or_default())
        }
    }
}

/// Unchecked wire form of [`ExecutionResult`].
#[derive(Deserialize)]
struct ResultFields {
    success: bool,
    output: Option<String>,
    error: Option<String>,
}

impl TryFrom<ResultFields> for ExecutionResult {
    type Error = String;

    fn try_from(fields: ResultFields) -> Result<Self, Self::Error> {
        match fields {
            ResultFields {
                success: true,
                output: Some(output),
                error: None,
            } => Ok(Self::succeeded(output)),
            ResultFields {
                success: false,
                output: None,
                error: Some(error),
            } => Ok(Self::failed(error)),
            ResultFields { success, .. } => Err(format!(
                "success={success} requires exactly the {} field to be set",
                if success { "output" } else { "error" }
            )),
        }
    }
}

/// Exit status zero keeps stdout; anything else keeps stderr.
impl From<ScriptOutput> for ExecutionResult {
    fn from(output: ScriptOutput) -> Self {
        if output.exit_code == 0 {
            Self::succeeded(output.stdout)
        } else {
            Self::failed(output.stderr)
        }
    }
}

impl From<ScriptError> for ExecutionResult {
    fn from(err: ScriptError) -> Self {
        Self::failed(err.to_string())
    }
}

impl From<Result<ScriptOutput, ScriptError>> for ExecutionResult {
    fn from(result: Result<ScriptOutput, ScriptError>) -> Self {
        match result {
            Ok(output) => output.into(),
            Err(err) => err.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn output(exit_code: i32) -> ScriptOutput {
        ScriptOutput {
            stdout: "out\n".to_string(),
            stderr: "err\n".to_string(),
            exit_code,
            duration_ms: 3,
        }
    }

    #[test]
    fn zero_exit_keeps_stdout_only() {
        let result = ExecutionResult::from(output(0));
        assert!(result.is_success());
        assert_eq!(result.output(), Some("out\n"));
        assert_eq!(result.error(), None);
    }

    #[test]
    fn nonzero_exit_keeps_stderr_only() {
        let result = ExecutionResult::from(output(2));
        assert!(!result.is_success());
        assert_eq!(result.output(), None);
        assert_eq!(result.error(), Some("err\n"));
    }

    #[test]
    fn signal_exit_is_a_failure() {
        let result = ExecutionResult::from(output(-1));
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("err\n"));
    }

    #[test]
    fn script_error_becomes_failed_result() {
        let result = ExecutionResult::from(ScriptError::NotFound("/tmp/gone.py".into()));
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("Script not found: /tmp/gone.py"));
    }

    #[test]
    fn serializes_absent_side_as_null() {
        let json = serde_json::to_value(ExecutionResult::succeeded("hello\n")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "output": "hello\n", "error": null})
        );

        let json = serde_json::to_value(ExecutionResult::failed("boom")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "output": null, "error": "boom"})
        );
    }

    #[test]
    fn deserializes_consistent_shapes() {
        let ok: ExecutionResult =
            serde_json::from_str(r#"{"success":true,"output":"hi\n","error":null}"#).unwrap();
        assert_eq!(ok, ExecutionResult::succeeded("hi\n"));

        let failed: ExecutionResult =
            serde_json::from_str(r#"{"success":false,"output":null,"error":"boom"}"#).unwrap();
        assert_eq!(failed, ExecutionResult::failed("boom"));
    }

    #[test]
    fn rejects_inconsistent_shapes() {
        for raw in [
            r#"{"success":true,"output":null,"error":"boom"}"#,
            r#"{"success":true,"output":null,"error":null}"#,
            r#"{"success":false,"output":"x","error":"y"}"#,
            r#"{"success":false,"output":"x","error":null}"#,
        ] {
            let err = serde_json::from_str::<ExecutionResult>(raw)
                .expect_err("inconsistent result must not deserialize");
            assert!(err.to_string().contains("requires exactly"), "{raw}: {err}");
        }
    }

    #[test]
    fn into_outcome_splits_on_success() {
        assert_eq!(
            ExecutionResult::succeeded("x").into_outcome(),
            Ok("x".to_string())
        );
        assert_eq!(
            ExecutionResult::failed("y").into_outcome(),
            Err("y".to_string())
        );
    }
}
