//! Application configuration domain model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Documents endpoint of the MicroRealEstate API.
pub const DEFAULT_DOCUMENTS_PATH: &str = "/api/v2/documents";

/// Application configuration
///
/// Pure data mapped from the TOML config file. Missing sections take their
/// defaults; paths are not checked for existence here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL relative document paths are joined onto
    pub base_url: String,

    /// Prefix of composite document keys
    pub documents_path: String,

    /// Opaque bearer token attached to every request
    pub access_token: Option<String>,

    /// Request timeout; the HTTP client default applies when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            documents_path: DEFAULT_DOCUMENTS_PATH.to_string(),
            access_token: None,
            timeout_secs: None,
        }
    }
}

/// Local storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where downloaded documents are written; platform download dir when unset
    pub download_dir: Option<PathBuf>,
}

/// Localization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub locale: String,

    /// Fluent (`.ftl`) file whose messages override the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            catalog_path: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write a daily rolling log file
    pub file: bool,
}
