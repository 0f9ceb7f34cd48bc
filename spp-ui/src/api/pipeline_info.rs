//! Pipeline information API - describes the loaded model for display
//!
//! Pure introspection of the startup-loaded pipeline: stage list, model
//! provenance, and the feature glossary. Nothing here touches the
//! prediction path.

use axum::{extract::State, Json};
use serde::Serialize;
use spp_common::features::{FeatureField, FEATURE_FIELDS};

use crate::pipeline::{PipelineMetadata, StageInfo};
use crate::AppState;

/// Pipeline information response
#[derive(Debug, Serialize)]
pub struct PipelineInfoResponse {
    pub model: PipelineMetadata,
    pub stages: Vec<StageInfo>,
    pub features: Vec<FeatureField>,
}

/// GET /api/pipeline
///
/// Always succeeds once the service is up: the pipeline loaded at startup
/// or the process never reached the router.
pub async fn pipeline_info(State(state): State<AppState>) -> Json<PipelineInfoResponse> {
    Json(PipelineInfoResponse {
        model: state.pipeline.metadata().clone(),
        stages: state.pipeline.stages(),
        features: FEATURE_FIELDS.to_vec(),
    })
}
