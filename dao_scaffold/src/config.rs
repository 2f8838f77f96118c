//! Configuration handling for DaoScaffold

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{Error, Result};

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete DaoScaffold configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub generation: GenerationConfig,
    pub logging: Option<LoggingConfig>,
}

/// Project layout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProjectConfig {
    pub root: String,
    pub extension: String,
    pub dao_dir: String,
    pub service_dir: String,
    pub model_dir: String,
    pub reserved_modules: Vec<String>,
    pub strict_listing: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            extension: "js".to_string(),
            dao_dir: "dao".to_string(),
            service_dir: "service".to_string(),
            model_dir: "model".to_string(),
            reserved_modules: vec!["database".to_string()],
            strict_listing: true,
        }
    }
}

/// File generation behavior configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub cover: bool,
    pub validate: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            cover: false,
            validate: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    /// Log to stderr when no file is set
    #[serde(alias = "stdout")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: "text".to_string(),
            console: true,
        }
    }
}
