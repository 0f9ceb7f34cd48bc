//! spp-ui library - Song Popularity Predictor service
//!
//! One-shot, single-user, synchronous form-to-prediction flow: the embedded
//! web form collects seven audio features, the loaded pipeline scores them,
//! and the result is displayed with an optional plain-text export.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::pipeline::Pipeline;

pub mod api;
pub mod pipeline;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The pre-trained pipeline, loaded once at startup and read-only for
    /// the remainder of the process lifetime
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/predict", post(api::predict))
        .route("/api/pipeline", get(api::pipeline_info))
        .route("/api/export", get(api::export_results))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
