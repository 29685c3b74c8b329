//! # comms911-server
//!
//! The HTTP backend for drafting TERT and NG9-1-1 policy manuals and for
//! asking questions about uploaded reference documents.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

use crate::{
    config::{get_config, AppConfig},
    router::create_router,
    state::build_app_state,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Serves the API on `listener` until Ctrl-C.
///
/// Sessions only live in memory, so on shutdown every remaining session is
/// dropped together with its similarity index.
pub async fn run(listener: TcpListener, config: AppConfig) -> anyhow::Result<()> {
    debug!(?config, "Server configuration loaded");

    let app_state = build_app_state(config).await?;
    let app = create_router(app_state.clone());

    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for the shutdown signal: {}", e);
            }
        })
        .await?;

    let removed = app_state.clear_sessions().await;
    info!("Shut down; discarded {} sessions.", removed);
    Ok(())
}

/// Sets up `.env`, logging and configuration, binds the port, then calls `run`.
pub async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = get_config(None)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    run(listener, config).await
}
