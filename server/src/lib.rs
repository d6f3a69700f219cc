//! `landing-server`: admin-managed landing page content API.
//!
//! Serves the landing page document over HTTP with a cache-aside read path
//! and admin-guarded write routes. Content lives in two JSON files (see
//! `landing-content`); Redis, when configured, caches the public view.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod service;
pub mod state;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::router::create_router;
use crate::state::AppState;

/// Run the server until Ctrl+C.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    if config.admin_tokens.is_empty() {
        tracing::warn!("no admin tokens configured; all admin routes will return 403");
    }
    tracing::info!(
        content = %config.content_path.display(),
        ab_tests = %config.ab_tests_path.display(),
        environment = config.environment.as_str(),
        "starting landing page server"
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    let state = AppState::from_config(config).await;
    serve(listener, state).await
}

/// Serve `state` on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down gracefully");
}
