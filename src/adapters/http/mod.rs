//! HTTP transport for the inference pipeline.
//!
//! Decodes multipart uploads, runs the pipeline, and maps typed errors to status codes.

mod api;
pub mod error;
pub mod handlers;
mod state;

pub use api::create_router;
pub use error::ErrorBody;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::ServiceSettings;
use crate::domain::ports::ModelHandle;
use crate::utils::monitor::SystemMonitor;

/// Serve until ctrl+c.
pub async fn run_server(settings: ServiceSettings, model: ModelHandle) -> anyhow::Result<()> {
    let monitor = SystemMonitor::new(settings.monitor);
    let state = Arc::new(AppState::new(model, monitor));
    let app = create_router(state.clone(), &settings);

    let addr: SocketAddr = settings.bind_address().parse()?;
    info!(
        address = %addr,
        model_loaded = state.model().is_loaded(),
        max_upload_size_kb = settings.max_upload_size / 1024,
        origins = ?settings.allowed_origins,
        started_at = %state.started_at.to_rfc3339(),
        "MetaSelect API starting"
    );
    state.monitor.log_stats("startup");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening and ready to accept connections");

    let shutdown_state = state.clone();
    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install ctrl+c handler");
            std::future::pending::<()>().await;
        }
        info!(
            uptime_secs = shutdown_state.uptime_secs(),
            "Shutdown signal received, stopping server gracefully"
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    state.monitor.log_final_stats();
    info!("Server shut down cleanly");
    Ok(())
}
