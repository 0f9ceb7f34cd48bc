//! Build identification endpoint
//!
//! The same identification stamped into the startup log line, exposed so
//! the page header can show which build answered.

use axum::Json;
use serde::Serialize;

/// Identification captured by build.rs at compile time
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

/// The running binary's build identification
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_hash: env!("GIT_HASH"),
    build_timestamp: env!("BUILD_TIMESTAMP"),
    build_profile: env!("BUILD_PROFILE"),
};

/// GET /api/buildinfo
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BUILD_INFO)
}
