//! Prediction API
//!
//! One submission becomes one inference call: the candidate features are
//! validated field-by-field, a complete vector is scored by the loaded
//! pipeline, and the score is returned with the song name carried through
//! unchanged. Validation and inference failures are reported to the
//! caller; neither is fatal to the service.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use spp_common::features::{FeatureVector, SongFeatures, ValidationError};
use tracing::warn;

use crate::pipeline::PredictionError;
use crate::AppState;

/// Submission payload from the form
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Optional free-text song name, no format constraint
    #[serde(default)]
    pub song_name: Option<String>,
    pub features: SongFeatures,
}

/// Successful prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub song_name: Option<String>,
    pub score: f64,
}

/// POST /api/predict
///
/// The feature vector is built fresh from this submission and discarded
/// once the score is computed; nothing is retained across submissions.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, PredictApiError> {
    let vector = FeatureVector::try_from(&request.features)?;

    let score = state.pipeline.predict(&vector).map_err(|e| {
        warn!("Prediction failed: {}", e);
        e
    })?;

    Ok(Json(PredictResponse {
        song_name: request.song_name,
        score,
    }))
}

/// Prediction API errors
#[derive(Debug)]
pub enum PredictApiError {
    /// Collector-level rejection: missing or out-of-domain field
    Validation(ValidationError),
    /// The pipeline failed during scoring
    Inference(PredictionError),
}

impl From<ValidationError> for PredictApiError {
    fn from(e: ValidationError) -> Self {
        PredictApiError::Validation(e)
    }
}

impl From<PredictionError> for PredictApiError {
    fn from(e: PredictionError) -> Self {
        PredictApiError::Inference(e)
    }
}

impl IntoResponse for PredictApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PredictApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            PredictApiError::Inference(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error during prediction: {}", e),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
