use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::parameters::HttpClientParameters;
use crate::runner::RunnerSettings;

/// File name looked up in the current directory.
pub const SETTINGS_FILE_NAME: &str = "ijhttp.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Settings file contents.
///
/// ```toml
/// [parameters]
/// files = ["orders.http"]
/// log_level = "HEADERS"
///
/// [runner]
/// timeout = 60000
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSettings {
    pub parameters: HttpClientParameters,
    pub runner: RunnerSettings,
}

impl RunSettings {
    /// Candidate settings files, most specific first.
    ///
    /// `./ijhttp.toml`, then `ijhttp-tools/config.toml` under the platform config
    /// directory (`~/.config` on Linux).
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ijhttp-tools").join("config.toml"));
        }
        paths
    }

    /// Load settings.
    ///
    /// - An explicit path must exist.
    /// - Otherwise the first existing default path is used.
    /// - No file at all yields `RunSettings::default()`.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read and parse a settings file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: RunSettings = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }
}
