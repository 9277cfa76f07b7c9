//! Monolith Binary - Local deployment
//!
//! Wires up:
//! - Local adapters (tokio child processes, filesystem)
//! - Transcoding pipeline behind the video service
//! - HTTP upload and playback routes

use hls_ladder::adapters::local::{http, TokioProcessRunner};
use hls_ladder::{LocalConfig, VideoService};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = LocalConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = tokio::fs::create_dir_all(&config.pipeline.storage_root).await {
        tracing::error!(root = ?config.pipeline.storage_root, error = %e, "cannot create storage root");
        std::process::exit(1);
    }

    // 1. Adapters + application service
    let runner = Arc::new(TokioProcessRunner::new());
    let service = Arc::new(VideoService::new(runner, &config.pipeline));

    // 2. HTTP layer
    let app = http::router(service);

    // 3. Start Server
    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %config.bind_addr(), error = %e, "failed to bind TCP listener");
            std::process::exit(1);
        }
    };
    tracing::info!(
        addr = %config.bind_addr(),
        storage_root = ?config.pipeline.storage_root,
        "listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
