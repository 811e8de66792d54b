pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers::execution;
use crate::state::AppState;

/// Execution routes, mounted at the root.
///
/// ```text
/// POST   /execute          -> execute_code   (JSON {"code": ...})
/// POST   /execute-file     -> execute_file   (multipart, field "script")
/// ```
pub fn execution_routes() -> Router<AppState> {
    Router::new()
        .route("/execute", post(execution::execute_code))
        .route("/execute-file", post(execution::execute_file))
}
