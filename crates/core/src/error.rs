/// Errors raised before a script reaches the executor.
///
/// Executor-level conditions never surface here; they are folded into an
/// [`ExecutionResult`](crate::scripting::result::ExecutionResult) instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{context}: {source}")]
    Staging {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub(crate) fn staging(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Staging { context, source }
    }
}
