//! Result export endpoint
//!
//! Produces the two-line plain-text payload offered as a download after a
//! successful prediction.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use spp_common::PredictionResult;

/// Query parameters describing the result to export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub song_name: Option<String>,
    pub score: f64,
}

/// GET /api/export?song_name=..&score=..
///
/// Returns `prediction_results.txt` as a plain-text attachment.
pub async fn export_results(Query(query): Query<ExportQuery>) -> Response {
    let result = PredictionResult::new(query.song_name, query.score);

    (
        StatusCode::OK,
        [
            ("content-type", "text/plain; charset=utf-8"),
            (
                "content-disposition",
                "attachment; filename=\"prediction_results.txt\"",
            ),
        ],
        result.export_text(),
    )
        .into_response()
}
