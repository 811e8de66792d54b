#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use execbridge_api::config::ServerConfig;
use execbridge_api::router::build_app_router;
use execbridge_api::state::AppState;

pub const TEST_ORIGIN: &str = "http://localhost:3000";
const BOUNDARY: &str = "execbridge-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Scripts are run through POSIX `sh` so tests do not depend on a Python
/// installation, and staging directories are created under `staging_root`
/// so tests can check nothing is left behind.
pub fn test_config(staging_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        cert_dirs: vec![],
        shutdown_timeout_secs: 30,
        python_bin: "sh".to_string(),
        execution_timeout: Some(Duration::from_secs(30)),
        staging_dir: Some(staging_root.to_path_buf()),
        max_body_bytes: None,
        log_file: None,
    }
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(staging_root: &Path) -> Router {
    build_app_router(AppState::new(test_config(staging_root)))
}

/// Build the application from an explicit config.
pub fn build_app_with(config: ServerConfig) -> Router {
    build_app_router(AppState::new(config))
}

/// Entries remaining directly under `root`.
pub fn residual_entries(root: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(root)
        .expect("read staging root")
        .map(|e| e.expect("dir entry").path())
        .collect()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a multipart body with one file field.
pub async fn post_file(
    app: Router,
    uri: &str,
    field: &str,
    filename: Option<&str>,
    contents: &[u8],
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, filename, contents)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub fn multipart_body(field: &str, filename: Option<&str>, contents: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
