//! Song feature domain types and validation
//!
//! Defines the seven audio features consumed by the popularity predictor,
//! their bounds, and the validating construction of a complete feature
//! vector from (possibly partial) form input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of features the predictor consumes
pub const FEATURE_COUNT: usize = 7;

/// Static description of one feature field: bounds, label, and the
/// one-line description shown in the UI glossary.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    /// Control step size for the UI slider
    pub step: f64,
    /// Field only accepts whole numbers
    pub integer: bool,
    pub description: &'static str,
}

/// Feature field metadata, in predictor input order.
///
/// The order here is the wire order of the trained pipeline's input row
/// and must not change.
pub const FEATURE_FIELDS: [FeatureField; FEATURE_COUNT] = [
    FeatureField {
        name: "duration_ms",
        label: "Song Duration (ms)",
        min: 100.0,
        max: 300_000.0,
        step: 1.0,
        integer: true,
        description: "Total duration of the song in milliseconds",
    },
    FeatureField {
        name: "acousticness",
        label: "Acousticness",
        min: 0.0,
        max: 1.0,
        step: 0.0001,
        integer: false,
        description: "Measure of the acoustic sound level in the track",
    },
    FeatureField {
        name: "danceability",
        label: "Danceability",
        min: 0.0,
        max: 1.0,
        step: 0.001,
        integer: false,
        description: "How suitable the track is for dancing",
    },
    FeatureField {
        name: "liveness",
        label: "Liveness",
        min: 0.0,
        max: 1.0,
        step: 0.0001,
        integer: false,
        description: "Presence of an audience in the recording",
    },
    FeatureField {
        name: "loudness_db",
        label: "Loudness (dB)",
        min: -60.0,
        max: 1.0,
        step: 0.001,
        integer: false,
        description: "Overall loudness of the track in decibels",
    },
    FeatureField {
        name: "tempo_bpm",
        label: "Tempo (BPM)",
        min: 50.0,
        max: 300.0,
        step: 0.1,
        integer: false,
        description: "Tempo of the song in beats per minute",
    },
    FeatureField {
        name: "audio_valence",
        label: "Audio Valence",
        min: 0.0,
        max: 1.0,
        step: 0.001,
        integer: false,
        description: "Musical positivity or mood of the track",
    },
];

/// Raw feature values as collected from the form.
///
/// Every field is optional at this stage: the user may submit before
/// filling everything in. Validation happens when converting into a
/// [`FeatureVector`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SongFeatures {
    pub duration_ms: Option<f64>,
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub liveness: Option<f64>,
    pub loudness_db: Option<f64>,
    pub tempo_bpm: Option<f64>,
    pub audio_valence: Option<f64>,
}

impl SongFeatures {
    /// Field values in predictor input order, parallel to [`FEATURE_FIELDS`]
    fn in_order(&self) -> [Option<f64>; FEATURE_COUNT] {
        [
            self.duration_ms,
            self.acousticness,
            self.danceability,
            self.liveness,
            self.loudness_db,
            self.tempo_bpm,
            self.audio_valence,
        ]
    }
}

/// Collector-level rejection of a submission
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more required fields unset at submit time
    #[error("please fill in all fields: missing value for {0}")]
    MissingField(&'static str),

    /// Field holds a value but it lies outside the declared domain
    #[error("{field} value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Field must hold a whole number
    #[error("{field} must be a whole number")]
    NotInteger { field: &'static str },
}

/// A complete, validated feature row ready for inference.
///
/// Can only be obtained through [`FeatureVector::try_from`], so holding one
/// guarantees every field was present and within its domain. Built fresh
/// per submission and discarded after the prediction call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// The validated row, in the fixed predictor input order
    pub fn as_row(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl TryFrom<&SongFeatures> for FeatureVector {
    type Error = ValidationError;

    /// Validate each field independently against its own domain.
    ///
    /// Bounds are inclusive on both ends. There is no cross-field
    /// validation: an implausible loudness/tempo combination passes as
    /// long as each value is individually in range.
    fn try_from(features: &SongFeatures) -> Result<Self, ValidationError> {
        let mut row = [0.0; FEATURE_COUNT];
        for (slot, (field, value)) in row
            .iter_mut()
            .zip(FEATURE_FIELDS.iter().zip(features.in_order()))
        {
            let value = value.ok_or(ValidationError::MissingField(field.name))?;
            if field.integer && value.fract() != 0.0 {
                return Err(ValidationError::NotInteger { field: field.name });
            }
            if !value.is_finite() || value < field.min || value > field.max {
                return Err(ValidationError::OutOfRange {
                    field: field.name,
                    value,
                    min: field.min,
                    max: field.max,
                });
            }
            *slot = value;
        }
        Ok(FeatureVector(row))
    }
}
