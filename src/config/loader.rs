//! Configuration file loading with precedence handling.
//!
//! Precedence, lowest to highest: hardcoded defaults, config file,
//! `HPLV_*` environment variables, CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read an explicitly requested config file.
    #[error("failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to defaults.
/// Corresponds to `~/.config/hplv/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path the tracing log file is written to.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Directory exported payloads are written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path the tracing log file is written to.
    pub log_file_path: PathBuf,

    /// Directory exported payloads are written to.
    pub export_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_file_path(),
            export_dir: PathBuf::from("."),
        }
    }
}

fn default_log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hplv")
        .join("hplv.log")
}

/// Default location of the config file, if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hplv").join("config.toml"))
}

/// Load the config file from an explicit path or the default location.
///
/// A missing file at the *default* location is fine (`Ok(None)`); a missing
/// or unreadable file at an *explicit* path is an error, since the user
/// asked for exactly that file.
pub fn load_config_with_precedence(
    explicit_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match explicit_path {
        Some(path) => read_config_file(&path).map(Some),
        None => match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path).map(Some),
            _ => Ok(None),
        },
    }
}

fn read_config_file(path: &std::path::Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Merge a config file (or none) over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();
    if let Some(file) = file {
        if let Some(path) = file.log_file_path {
            config.log_file_path = path;
        }
        if let Some(dir) = file.export_dir {
            config.export_dir = dir;
        }
    }
    config
}

/// Apply `HPLV_LOG_FILE` and `HPLV_EXPORT_DIR` environment overrides.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var("HPLV_LOG_FILE") {
        if !path.is_empty() {
            config.log_file_path = PathBuf::from(path);
        }
    }
    if let Ok(dir) = std::env::var("HPLV_EXPORT_DIR") {
        if !dir.is_empty() {
            config.export_dir = PathBuf::from(dir);
        }
    }
    config
}

/// Apply CLI argument overrides (highest precedence).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    export_dir: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(dir) = export_dir {
        config.export_dir = dir;
    }
    config
}

// ===== Tests =====

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
