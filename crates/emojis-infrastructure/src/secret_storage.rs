//! Secret configuration file storage.
//!
//! Loads `secret.json` and resolves the GitHub token used by the remote source.
//!
//! # Security Note
//!
//! `secret.json` is plaintext and should be mode 600. Tokens are never logged
//! and never appear in error messages.

use crate::paths::{EmojisPaths, ServiceType};
use emojis_core::config::SecretConfig;
use emojis_core::error::{EmojisError, Result};
use std::fs;
use std::path::PathBuf;

/// Environment variables consulted, in order, when `secret.json` has no token.
pub const TOKEN_ENV_VARS: [&str; 2] = ["EMOJIS_GITHUB_TOKEN", "GITHUB_TOKEN"];

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Secret file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

/// Read-only access to `secret.json`.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new(paths: &EmojisPaths) -> Result<Self> {
        Ok(Self {
            path: paths.get_path(ServiceType::Secret)?,
        })
    }

    /// Creates a new SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> std::result::Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Resolves the GitHub token from `secret.json`, then the environment.
    pub fn github_token(&self) -> Result<String> {
        self.github_token_with(|name| std::env::var(name).ok())
    }

    /// Like [`Self::github_token`], reading environment variables through `env`.
    pub fn github_token_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<String> {
        let secrets = match self.load() {
            Ok(secrets) => Some(secrets),
            Err(SecretStorageError::NotFound(_)) => None,
            Err(e) => return Err(EmojisError::config(e.to_string())),
        };
        resolve_github_token(secrets.as_ref(), env)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// Picks the first non-empty token from `secrets`, then from `env` in
/// [`TOKEN_ENV_VARS`] order.
pub fn resolve_github_token(
    secrets: Option<&SecretConfig>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    if let Some(token) = secrets.and_then(SecretConfig::github_token) {
        return Ok(token.to_string());
    }

    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| env(name))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
        .ok_or_else(|| {
            EmojisError::config(format!(
                "GitHub token not found in secret.json or environment ({})",
                TOKEN_ENV_VARS.join(", ")
            ))
        })
}
