//! spp-ui - Song Popularity Predictor service
//!
//! Serves the single-page prediction form and the JSON API behind it. The
//! trained pipeline artifact is loaded once here; if that load fails the
//! process exits before serving, since no prediction could ever succeed.

use anyhow::Result;
use clap::Parser;
use spp_ui::api::buildinfo::BUILD_INFO;
use spp_ui::{build_router, AppState};
use std::path::PathBuf;
use tracing::{error, info};

/// Song Popularity Predictor service
#[derive(Debug, Parser)]
#[command(name = "spp-ui", version)]
struct Cli {
    /// Path to the trained pipeline artifact
    #[arg(long)]
    model: Option<PathBuf>,

    /// Listen address (host:port)
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Song Popularity Predictor (spp-ui) v{} [{}] built {} ({})",
        BUILD_INFO.version, BUILD_INFO.git_hash, BUILD_INFO.build_timestamp, BUILD_INFO.build_profile
    );

    let cli = Cli::parse();

    let model_path = spp_common::config::resolve_model_path(cli.model.as_deref());
    info!("Pipeline artifact: {}", model_path.display());

    // Startup dependency: without the pipeline nothing can be served
    let pipeline = match spp_ui::pipeline::Pipeline::load(&model_path) {
        Ok(pipeline) => {
            info!(
                "Loaded pipeline: model version {}, trained {}, {} stage(s)",
                pipeline.metadata().version,
                pipeline.metadata().trained_at,
                pipeline.stages().len()
            );
            pipeline
        }
        Err(e) => {
            error!("Failed to load pipeline artifact: {}", e);
            return Err(e.into());
        }
    };

    let listen = spp_common::config::resolve_listen(cli.listen.as_deref())?;

    // Create application state and router
    let state = AppState::new(pipeline);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("spp-ui listening on http://{}", listen);
    info!("Health check: http://{}/health", listen);

    axum::serve(listener, app).await?;

    Ok(())
}
