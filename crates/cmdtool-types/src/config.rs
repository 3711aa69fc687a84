//! Shell configuration loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Default bound on nested `execute` calls.
pub const DEFAULT_MAX_SCRIPT_DEPTH: usize = 16;

/// Default request timeout for the backend probe.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 10;

/// Top-level shell configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Directory for synthesized log file names.
    pub log_dir: PathBuf,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Persistent interactive history. `None` keeps history in memory only.
    pub history_file: Option<PathBuf>,
    /// Maximum nesting of `execute` inside scripts.
    pub max_script_depth: usize,
    /// Backend probe endpoint. Probe commands are only registered when set.
    pub backend: Option<BackendConfig>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            log_filter: "info".to_string(),
            history_file: None,
            max_script_depth: DEFAULT_MAX_SCRIPT_DEPTH,
            backend: None,
        }
    }
}

/// Connection settings for the backend probe.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// `host:port` of the backend API.
    pub address: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_SECS
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: ShellConfig =
            toml::from_str(text).map_err(|e| ShellError::Config(format!("{e}")))?;
        if config.max_script_depth == 0 {
            return Err(ShellError::Config(
                "max_script_depth must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ShellError::Config(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_toml(&text)
    }
}
