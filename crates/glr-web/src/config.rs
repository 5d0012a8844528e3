//! Configuration file parsing for the web service.
//!
//! Loads settings from TOML files including bind address, the extraction
//! model, and the API credential. The credential may also come from the
//! process environment, which takes precedence over the file.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the API bearer credential.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Web service configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// No API credential in the environment or the config file
    #[error("Missing API credential: set OPENROUTER_API_KEY or the api_key config field")]
    MissingApiKey,
}

/// Web service configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// API bearer credential. The OPENROUTER_API_KEY environment variable
    /// takes precedence over this field.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Referer header sent with every completion request
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Chat-completions endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_model() -> String {
    glr_llm::openrouter::DEFAULT_MODEL.to_string()
}

fn default_referer() -> String {
    "https://yourapp.com".to_string()
}

impl WebConfig {
    /// Load configuration from a TOML file
    ///
    /// The API credential is not validated here; [`WebConfig::resolve_api_key`]
    /// runs at server startup so the environment variable can still satisfy
    /// a file without an `api_key` field.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: WebConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Get the default configuration file path (~/.glr/config.toml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".glr").join("config.toml"))
    }

    /// Resolve the API bearer credential
    ///
    /// The OPENROUTER_API_KEY environment variable wins over the config
    /// field. Absence of both is a startup error.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key_with(&self, env_value: Option<String>) -> Result<String, ConfigError> {
        if let Some(key) = env_value {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Create a default configuration for testing
    ///
    /// Carries no API credential, so startup still requires
    /// OPENROUTER_API_KEY in the environment.
    pub fn default_test_config() -> Self {
        WebConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            api_key: None,
            model: default_model(),
            referer: default_referer(),
            endpoint: None,
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
