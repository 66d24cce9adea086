/// Server binary: loads configuration, wires the Slack service into the
/// router and serves until shutdown.
///
/// The webhook endpoint acks before processing; file_shared handling runs
/// as a detached background task with no persistence or redelivery.
use std::sync::Arc;
use tokio::net::TcpListener;

use slack_integration_middleware::config::Settings;
use slack_integration_middleware::utils::logging::*;
use slack_integration_middleware::utils::AppError;
use slack_integration_middleware::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env when present; in deployed environments the variables come
    // from the process environment instead.
    if dotenvy::dotenv().is_ok() {
        tracing::debug!(".env file loaded");
    }

    tracing_subscriber::fmt::init();

    let settings = Settings::new()
        .map_err(|e| AppError::ConfigError(format!("Failed to load settings: {}", e)))?;

    log_config_loaded(&std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()));

    let state = Arc::new(AppState::new(settings.clone()));
    let app = build_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(settings.server.port);
    let listener = TcpListener::bind(format!("{}:{}", settings.server.host, port)).await?;

    log_server_startup(port);
    log_server_ready(port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info("🛑 Server shut down gracefully");
    Ok(())
}

/// Signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_info("🛑 Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log_info("🛑 Received SIGTERM, shutting down gracefully...");
        }
    }
}
