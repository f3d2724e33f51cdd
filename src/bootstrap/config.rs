//! # Configuration Loader
//!
//! Reads the TOML config file into [`AppConfig`]. Missing sections and keys
//! take their defaults; nothing is validated here, the adapters reject what
//! they cannot use when they are built.

use std::path::PathBuf;

use anyhow::Context;
use mre_core::AppConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config
/// document (bad TOML syntax or a value of the wrong type).
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}
