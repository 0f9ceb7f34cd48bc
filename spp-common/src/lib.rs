//! # SPP Common Library
//!
//! Shared code for the Song Popularity Predictor:
//! - Feature domain types and validation
//! - Prediction result and text export
//! - Configuration resolution
//! - Common error types

pub mod config;
pub mod error;
pub mod export;
pub mod features;

pub use error::{Error, Result};
pub use export::PredictionResult;
pub use features::{FeatureVector, SongFeatures, ValidationError};
