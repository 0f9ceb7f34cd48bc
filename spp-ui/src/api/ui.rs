//! Embedded single-page UI
//!
//! The prediction form and its script are compiled into the binary with
//! `include_str!`, so the service ships as one self-contained executable
//! with no asset directory to configure.

use axum::http::header;
use axum::response::{Html, IntoResponse};

static INDEX_HTML: &str = include_str!("../ui/index.html");
static APP_JS: &str = include_str!("../ui/app.js");

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/javascript")], APP_JS)
}
