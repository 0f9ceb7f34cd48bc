//! HTTP API handlers for spp-ui

pub mod buildinfo;
pub mod export;
pub mod health;
pub mod pipeline_info;
pub mod predict;
pub mod ui;

pub use buildinfo::get_build_info;
pub use export::export_results;
pub use health::health_routes;
pub use pipeline_info::pipeline_info;
pub use predict::predict;
pub use ui::{serve_app_js, serve_index};
