pub mod validation;

use serde::{Deserialize, Serialize};

use crate::recovery::Confidence;

use self::validation::validate_config;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub base_path: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_worker_threads: Option<usize>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            base_path: String::new(),
            max_body_bytes: default_max_body_bytes(),
            runtime_worker_threads: None,
        }
    }
}

/// Tunables for the recovery pipeline.
///
/// `Default` reproduces the values a config file would get when the
/// `recovery` section is omitted, so library callers can skip YAML entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Upper bound on nested quoted-string unwraps.
    #[serde(default = "default_max_unwrap_depth")]
    pub max_unwrap_depth: usize,
    /// Maximum number of entries the plain-text fallback may return.
    #[serde(default = "default_fallback_max_objects")]
    pub fallback_max_objects: usize,
    /// Fallback fragments longer than this (in chars) are dropped.
    #[serde(default = "default_fallback_max_fragment_chars")]
    pub fallback_max_fragment_chars: usize,
    /// Label given to entries whose confidence is missing or unreadable.
    #[serde(default)]
    pub default_confidence: Confidence,
    /// Label given to every entry produced by the plain-text fallback.
    #[serde(default)]
    pub fallback_confidence: Confidence,
    #[serde(default)]
    pub include_raw_on_success: bool,
    /// Extra names (matched lowercase, exact) rejected on top of the built-in blacklist.
    #[serde(default)]
    pub extra_blacklist: Vec<String>,
}

fn default_max_unwrap_depth() -> usize {
    5
}
fn default_fallback_max_objects() -> usize {
    25
}
fn default_fallback_max_fragment_chars() -> usize {
    40
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_unwrap_depth: default_max_unwrap_depth(),
            fallback_max_objects: default_fallback_max_objects(),
            fallback_max_fragment_chars: default_fallback_max_fragment_chars(),
            default_confidence: Confidence::Low,
            fallback_confidence: Confidence::Low,
            include_raw_on_success: false,
            extra_blacklist: Vec::new(),
        }
    }
}

/// Feature flags and settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "INFO".to_string()
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
}

/// Load configuration from a YAML file and validate it.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when reading the file fails, [`ConfigError::Yaml`]
/// when parsing fails, or [`ConfigError::Validation`] when semantic validation fails.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::Yaml`] when parsing fails or
/// [`ConfigError::Validation`] when semantic validation fails.
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_yaml::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}
