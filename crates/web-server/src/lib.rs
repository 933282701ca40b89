use axum::{routing::get, Router};
use configuration::ServerConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod loader;

/// The shared application state that all handlers can access.
#[derive(Debug, Clone)]
pub struct AppState {
    pub results_dir: PathBuf,
    pub processed_dir: PathBuf,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            results_dir: config.results_dir.clone(),
            processed_dir: config.processed_dir.clone(),
        }
    }
}

/// Builds the application routes. Files are re-read on every request, so
/// regenerated results are served without a restart.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/log-returns", get(handlers::get_log_returns))
        .route("/change-points", get(handlers::get_change_points))
        .route("/matched-events", get(handlers::get_matched_events))
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serves `router` on an already bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, results_dir = %state.results_dir.display(), "Results server listening.");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Results server stopped.");
    Ok(())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: &ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    serve(listener, AppState::from(config)).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl-c.");
    }
}
