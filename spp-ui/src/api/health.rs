//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Liveness report, including which model is serving predictions
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Version string of the pipeline artifact loaded at startup
    pub model_version: String,
}

/// GET /health
///
/// A serving process always has a loaded pipeline, so the report can
/// name the model version unconditionally.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: "spp-ui",
        version: env!("CARGO_PKG_VERSION"),
        model_version: state.pipeline.metadata().version.clone(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
