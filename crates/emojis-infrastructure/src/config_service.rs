//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml`.

use crate::paths::{EmojisPaths, ServiceType};
use emojis_core::config::AppConfig;
use emojis_core::error::{EmojisError, Result};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(paths: &EmojisPaths) -> Result<Self> {
        Ok(Self {
            path: paths.get_path(ServiceType::Config)?,
        })
    }

    /// Creates a service reading a specific file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the configuration. A missing file yields defaults; a malformed one
    /// is a configuration error. Out-of-range values are clamped.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("No config at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            EmojisError::config(format!("Invalid {}: {}", self.path.display(), e))
        })?;
        Ok(config.normalized())
    }
}
