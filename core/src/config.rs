//! Client configuration.
//!
//! The only setting is the endpoint override. It is loaded from:
//! 1. Default values (the hosted API).
//! 2. A TOML snippet (`endpoint = "..."`), if the caller has one.
//! 3. The `NOTEOF_ENDPOINT` environment variable.
//!
//! Environment variables take precedence over TOML values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::endpoint::{Endpoint, DEFAULT_ENDPOINT};

/// Environment variable holding the endpoint override.
pub const ENDPOINT_ENV: &str = "NOTEOF_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL override; the hosted API is used when unset.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration from a TOML string, then apply environment overrides.
    pub fn from_toml_str(toml_content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml_content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(ENDPOINT_ENV) {
            self.endpoint = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Resolver for the configured endpoint.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(DEFAULT_ENDPOINT, self.endpoint.as_deref())
    }
}
