//! Prediction result and plain-text export

use serde::Serialize;

/// Fallback label when the user leaves the song name blank
pub const UNNAMED_SONG: &str = "Unnamed Song";

/// One successful inference: the predicted score plus the optional
/// user-supplied song name. Held only long enough to render and export.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub song_name: Option<String>,
    pub score: f64,
}

impl PredictionResult {
    pub fn new(song_name: Option<String>, score: f64) -> Self {
        Self { song_name, score }
    }

    /// Display label: the song name, or "Unnamed Song" when blank or absent
    pub fn display_name(&self) -> &str {
        match self.song_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNNAMED_SONG,
        }
    }

    /// Two-line plain-text payload for the download action
    pub fn export_text(&self) -> String {
        format!(
            "Song Name: {}\nPredicted Popularity: {}",
            self.display_name(),
            self.score
        )
    }
}
