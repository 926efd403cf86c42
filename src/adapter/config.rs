//! Application config loader (strict YAML parsing).

use std::fs;
use std::net::SocketAddr;

use serde::Deserialize;
use thiserror::Error;

use crate::core::domain::declaration::{DeclarationError, DeclarationTable};
use crate::core::domain::transactional_config::TransactionalConfig;

pub const CONFIG_PATH_ENV: &str = "TRANSACTIONAL_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "transactional.yaml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub database_url: String,

    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub transactional: TransactionalConfig,

    #[serde(default)]
    pub declarations: DeclarationTable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("Invalid yaml: {0}")]
    Parse(String),
    #[error("Invalid listen address: {0}")]
    Listen(String),
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

impl AppConfig {
    /// Loads the file named by `TRANSACTIONAL_CONFIG`, or `transactional.yaml`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::load_from_str(&s)
    }

    pub fn load_from_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig =
            serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        self.declarations.validate()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen
            .parse()
            .map_err(|_| ConfigError::Listen(self.listen.clone()))
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
