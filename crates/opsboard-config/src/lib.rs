//! Server configuration loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Deployment mode, selecting how much diagnostic detail error responses
/// carry. Production responses never leak internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Full Opsboard server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpsboardConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub cors: CorsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSection {
    /// The single browser origin allowed to call the API with credentials.
    #[serde(default = "default_origin")]
    pub origin: String,
}

impl Default for CorsSection {
    fn default() -> Self {
        Self {
            origin: default_origin(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_origin() -> String {
    "http://localhost:5173".to_string()
}

/// Load full Opsboard configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<OpsboardConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: OpsboardConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &OpsboardConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::Invalid(
            "server.port must be greater than 0".to_string(),
        ));
    }

    if config.cors.origin.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "cors.origin must not be empty".to_string(),
        ));
    }

    Ok(())
}
