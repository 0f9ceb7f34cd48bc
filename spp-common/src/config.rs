//! Configuration resolution for the predictor service
//!
//! Resolves the pipeline artifact path and the listen address following a
//! fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the pipeline artifact
pub const MODEL_PATH_ENV: &str = "SPP_MODEL_PATH";

/// Environment variable naming the listen address
pub const LISTEN_ENV: &str = "SPP_LISTEN";

/// Default service port
pub const DEFAULT_PORT: u16 = 5740;

/// Optional keys read from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub model_path: Option<PathBuf>,
    pub listen: Option<String>,
}

/// Resolve the pipeline artifact path.
///
/// Falls back to `<data dir>/spp/pipeline.json` when no tier provides a
/// value. Existence is not checked here; a missing artifact surfaces as a
/// load error at startup.
pub fn resolve_model_path(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
        return PathBuf::from(path);
    }

    if let Some(path) = read_file_config().model_path {
        return path;
    }

    default_model_path()
}

/// Resolve the listen address.
///
/// CLI and environment values must parse as `host:port`; a malformed value
/// is a configuration error rather than a silent fallback.
pub fn resolve_listen(cli_arg: Option<&str>) -> Result<SocketAddr> {
    let configured = cli_arg
        .map(str::to_string)
        .or_else(|| std::env::var(LISTEN_ENV).ok())
        .or_else(|| read_file_config().listen);

    match configured {
        Some(addr) => addr
            .parse()
            .map_err(|e| Error::Config(format!("Invalid listen address '{}': {}", addr, e))),
        None => Ok(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))),
    }
}

/// Read the TOML config file, if one exists.
///
/// A present but malformed file is logged and otherwise ignored so a typo
/// cannot keep the service from starting with defaults.
fn read_file_config() -> FileConfig {
    let Ok(path) = locate_config_file() else {
        return FileConfig::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                FileConfig::default()
            }
        },
        Err(e) => {
            warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}

/// Get the configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/spp/config.toml first, then /etc/spp/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("spp").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/spp/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("spp").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// OS-dependent default artifact location
fn default_model_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("spp"))
        .unwrap_or_else(|| PathBuf::from("./spp_data"))
        .join("pipeline.json")
}
