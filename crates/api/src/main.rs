use std::net::SocketAddr;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use execbridge_api::config::ServerConfig;
use execbridge_api::router::build_app_router;
use execbridge_api::state::AppState;
use execbridge_api::tls;
use execbridge_core::telemetry;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "execbridge_api=debug,execbridge_core=info,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    // Held until the end of `main`; dropping it flushes the log file.
    let _log_guard = telemetry::init(DEFAULT_LOG_FILTER, config.log_file.as_deref());
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");
    tracing::info!(
        interpreter = %config.python_bin,
        timeout_secs = ?config.execution_timeout.map(|t| t.as_secs()),
        "Script executor configured"
    );

    // --- App state + router ---
    let state = AppState::new(config.clone());
    let app = build_app_router(state);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );

    // --- Start server ---
    let dirs = config
        .cert_dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!(dirs = %dirs, "Checking for TLS certificates");

    match tls::discover_certificates(&config.cert_dirs) {
        Some(certs) => {
            tracing::info!(dir = %certs.dir.display(), %addr, "Starting server with HTTPS");

            let _ = rustls::crypto::ring::default_provider().install_default();
            let rustls_config = RustlsConfig::from_pem_file(&certs.cert, &certs.key)
                .await
                .expect("Failed to load TLS certificate and key");

            let handle = Handle::new();
            let shutdown_handle = handle.clone();
            let drain = Duration::from_secs(config.shutdown_timeout_secs);
            tokio::spawn(async move {
                shutdown_signal().await;
                shutdown_handle.graceful_shutdown(Some(drain));
            });

            axum_server::bind_rustls(addr, rustls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("Server error");
        }
        None => {
            tracing::warn!(dirs = %dirs, "SSL certificate files not found. Running in HTTP mode");
            tracing::info!(%addr, "Starting server");

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .expect("Failed to bind to address");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .expect("Server error");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
