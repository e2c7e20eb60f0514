//! Configuration for the index registry service

use anyhow::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    #[validate(length(min = 1))]
    pub bind_address: String,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MonitoringConfig {
    #[validate(length(min = 1))]
    pub log_level: String,
    pub structured_logging: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            enable_cors: true,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            structured_logging: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate_settings()?;
        Ok(config)
    }

    /// Validate configuration: derive rules plus checks the derive cannot
    /// express (address shape, known log level)
    pub fn validate_settings(&self) -> Result<()> {
        self.validate()?;
        self.api
            .bind_address
            .parse::<std::net::SocketAddr>()
            .map_err(|e| anyhow::anyhow!("invalid API bind address {:?}: {e}", self.api.bind_address))?;
        self.monitoring
            .log_level
            .parse::<tracing::Level>()
            .map_err(|_| anyhow::anyhow!("invalid log level: {:?}", self.monitoring.log_level))?;
        Ok(())
    }
}
