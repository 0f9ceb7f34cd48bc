//! Pre-trained inference pipeline
//!
//! The pipeline is produced by an external training process and shipped as
//! a JSON artifact: an ordered list of named stages plus model metadata.
//! It is loaded once at startup, never mutated afterwards, and exposes one
//! operation: map a validated feature vector to a scalar popularity score.
//!
//! Only the external contract is enforced here (seven ordered numeric
//! features in, one numeric score out). Structural problems inside the
//! artifact surface as a recoverable [`PredictionError`] at predict time,
//! never as a panic.

use serde::{Deserialize, Serialize};
use spp_common::features::{FeatureVector, FEATURE_COUNT};
use spp_common::Error;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Model provenance carried inside the artifact, surfaced on the
/// information page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineMetadata {
    pub version: String,
    pub trained_at: String,
}

/// One named stage of the pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineStage {
    pub name: String,
    #[serde(flatten)]
    pub kind: StageKind,
}

/// Stage parameters, tagged by `kind` in the artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageKind {
    /// Per-column standardization: `(x - mean) / scale`
    StandardScaler { means: Vec<f64>, scales: Vec<f64> },
    /// Per-column rescaling: `(x - min) / range`
    MinMaxScaler { mins: Vec<f64>, ranges: Vec<f64> },
    /// Terminal predictor: `intercept + coefficients . x`
    LinearRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::StandardScaler { means, .. } => {
                write!(f, "StandardScaler({} columns)", means.len())
            }
            StageKind::MinMaxScaler { mins, .. } => {
                write!(f, "MinMaxScaler({} columns)", mins.len())
            }
            StageKind::LinearRegression { coefficients, .. } => {
                write!(f, "LinearRegression({} coefficients)", coefficients.len())
            }
        }
    }
}

/// Stage name and description pair for informational display
#[derive(Debug, Clone, Serialize)]
pub struct StageInfo {
    pub name: String,
    pub description: String,
}

/// Failure during a single inference call.
///
/// Always recoverable: the submission ends without a result and the user
/// may resubmit. The loaded pipeline itself is unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("stage '{stage}' expects {expected} columns, input has {actual}")]
    DimensionMismatch {
        stage: String,
        expected: usize,
        actual: usize,
    },

    #[error("pipeline has no terminal predictor stage")]
    MissingPredictor,

    #[error("stage '{stage}' follows the terminal predictor stage")]
    TrailingStage { stage: String },

    #[error("stage '{stage}' produced a non-finite value")]
    NonFinite { stage: String },
}

/// On-disk artifact layout
#[derive(Debug, Deserialize)]
struct Artifact {
    metadata: PipelineMetadata,
    stages: Vec<PipelineStage>,
}

/// The loaded inference pipeline.
///
/// Constructed once during process initialization and held read-only for
/// the process lifetime; concurrent reads are safe without locking.
#[derive(Debug)]
pub struct Pipeline {
    metadata: PipelineMetadata,
    stages: Vec<PipelineStage>,
}

impl Pipeline {
    /// Load the pipeline artifact from disk.
    ///
    /// Any failure here is fatal for the service: without a pipeline no
    /// prediction can ever be served.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Artifact(format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact: Artifact = serde_json::from_str(&content).map_err(|e| {
            Error::Artifact(format!("cannot parse {}: {}", path.display(), e))
        })?;
        Ok(Self {
            metadata: artifact.metadata,
            stages: artifact.stages,
        })
    }

    pub fn metadata(&self) -> &PipelineMetadata {
        &self.metadata
    }

    /// Named stages of the pipeline, for informational display only.
    ///
    /// Pure introspection with no coupling to the prediction path.
    pub fn stages(&self) -> Vec<StageInfo> {
        self.stages
            .iter()
            .map(|stage| StageInfo {
                name: stage.name.clone(),
                description: stage.kind.to_string(),
            })
            .collect()
    }

    /// Run one inference: fold the validated row through the transform
    /// stages, then score it with the terminal predictor stage.
    ///
    /// Stateless with respect to the pipeline: identical input yields an
    /// identical score.
    pub fn predict(&self, vector: &FeatureVector) -> Result<f64, PredictionError> {
        let mut row: [f64; FEATURE_COUNT] = *vector.as_row();
        let mut stages = self.stages.iter();

        while let Some(stage) = stages.next() {
            match &stage.kind {
                StageKind::StandardScaler { means, scales } => {
                    check_width(stage, means.len().min(scales.len()))?;
                    for (value, (mean, scale)) in row.iter_mut().zip(means.iter().zip(scales)) {
                        *value = (*value - mean) / scale;
                    }
                    check_finite(stage, &row)?;
                }
                StageKind::MinMaxScaler { mins, ranges } => {
                    check_width(stage, mins.len().min(ranges.len()))?;
                    for (value, (min, range)) in row.iter_mut().zip(mins.iter().zip(ranges)) {
                        *value = (*value - min) / range;
                    }
                    check_finite(stage, &row)?;
                }
                StageKind::LinearRegression {
                    coefficients,
                    intercept,
                } => {
                    check_width(stage, coefficients.len())?;
                    let score = intercept
                        + row
                            .iter()
                            .zip(coefficients)
                            .map(|(value, coefficient)| value * coefficient)
                            .sum::<f64>();
                    if !score.is_finite() {
                        return Err(PredictionError::NonFinite {
                            stage: stage.name.clone(),
                        });
                    }
                    // The predictor consumes the row; nothing may follow it
                    if let Some(extra) = stages.next() {
                        return Err(PredictionError::TrailingStage {
                            stage: extra.name.clone(),
                        });
                    }
                    return Ok(score);
                }
            }
        }

        Err(PredictionError::MissingPredictor)
    }
}

fn check_width(stage: &PipelineStage, width: usize) -> Result<(), PredictionError> {
    if width != FEATURE_COUNT {
        return Err(PredictionError::DimensionMismatch {
            stage: stage.name.clone(),
            expected: width,
            actual: FEATURE_COUNT,
        });
    }
    Ok(())
}

fn check_finite(stage: &PipelineStage, row: &[f64; FEATURE_COUNT]) -> Result<(), PredictionError> {
    if row.iter().any(|value| !value.is_finite()) {
        return Err(PredictionError::NonFinite {
            stage: stage.name.clone(),
        });
    }
    Ok(())
}
