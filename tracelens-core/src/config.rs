//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/tracelens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/tracelens/` (~/.config/tracelens/)
//! - State/Logs: `$XDG_STATE_HOME/tracelens/` (~/.local/state/tracelens/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Output shape analyzer thresholds
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds for the output shape analyzer.
///
/// Defaults match the classification table renderers were built against;
/// override with care since display fixtures depend on them.
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyzerConfig {
    /// Character count above which string output counts as large
    #[serde(default = "default_large_text_chars")]
    pub large_text_chars: usize,

    /// Element count above which array output counts as large
    #[serde(default = "default_large_list_items")]
    pub large_list_items: usize,

    /// Row count above which tabular output counts as complex
    #[serde(default = "default_complex_table_rows")]
    pub complex_table_rows: usize,

    /// Key count above which object output counts as complex
    #[serde(default = "default_complex_object_keys")]
    pub complex_object_keys: usize,

    /// Key count above which object output counts as large
    #[serde(default = "default_large_object_keys")]
    pub large_object_keys: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            large_text_chars: default_large_text_chars(),
            large_list_items: default_large_list_items(),
            complex_table_rows: default_complex_table_rows(),
            complex_object_keys: default_complex_object_keys(),
            large_object_keys: default_large_object_keys(),
        }
    }
}

fn default_large_text_chars() -> usize {
    1000
}

fn default_large_list_items() -> usize {
    10
}

fn default_complex_table_rows() -> usize {
    5
}

fn default_complex_object_keys() -> usize {
    10
}

fn default_large_object_keys() -> usize {
    20
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/tracelens/config.toml` (~/.config/tracelens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("tracelens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/tracelens/` (~/.local/state/tracelens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("tracelens")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/tracelens/tracelens.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("tracelens.log")
    }
}
