//! Shared error types

use thiserror::Error;

/// Result alias used across the SPP crates
pub type Result<T> = std::result::Result<T, Error>;

/// Failures outside the per-submission prediction cycle
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration value could not be resolved or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline artifact could not be read or parsed
    #[error("Artifact error: {0}")]
    Artifact(String),
}
