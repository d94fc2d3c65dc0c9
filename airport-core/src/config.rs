//! Configuration file management for airport-search.
//!
//! Reads/writes `~/.airport-search/config.toml` with server settings,
//! dataset path, caller token, and log level.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{AirportError, Result};

/// Full configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer token required on `/api/*`. Unset means open access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// JSON dataset file. Unset means the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
            auth_token: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_level(),
        }
    }
}

/// Get the config directory path (`~/.airport-search/`).
pub fn config_dir() -> PathBuf {
    dirs_home().join(".airport-search")
}

/// Get the config file path.
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Home directory from `HOME` (or `USERPROFILE` on Windows), else the cwd.
fn dirs_home() -> PathBuf {
    ["HOME", "USERPROFILE"]
        .iter()
        .filter_map(std::env::var_os)
        .find(|v| !v.is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Load config from `path`, or from `~/.airport-search/config.toml`.
///
/// A missing file yields the default config; an unreadable or malformed one
/// is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file);
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|e| AirportError::Config(format!("{}: {e}", path.display())))?;
    parse_config(&text)
}

/// Save config to `path`, or to `~/.airport-search/config.toml`.
pub fn save_config(config: &Config, path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_file);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| AirportError::Config(e.to_string()))?;
    }

    let text = serialize_config(config)?;
    std::fs::write(&path, text).map_err(|e| AirportError::Config(e.to_string()))?;

    Ok(path)
}

pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| AirportError::Config(e.to_string()))
}

pub fn serialize_config(config: &Config) -> Result<String> {
    let body = toml::to_string_pretty(config).map_err(|e| AirportError::Config(e.to_string()))?;
    Ok(format!("# airport-search configuration\n\n{body}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
