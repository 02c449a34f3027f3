//! Unified path management for emojis configuration and storage files.
//!
//! ```text
//! ~/.config/emojis/            # Config directory (or the --home override)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # GitHub token
//! └── storage/                 # Persisted records (one JSON file per key)
//!     ├── all_emojis.json
//!     └── emojis_page_state.json
//! ```

use emojis_core::EmojisError;
use emojis_core::config::{GithubSecret, SecretConfig};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "emojis";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for EmojisError {
    fn from(err: PathError) -> Self {
        EmojisError::config(err.to_string())
    }
}

/// Files and directories managed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Secret,
    Storage,
}

/// Resolves application paths, optionally below a caller-provided base directory.
#[derive(Debug, Clone, Default)]
pub struct EmojisPaths {
    base: Option<PathBuf>,
}

impl EmojisPaths {
    /// Creates a resolver. With `base`, every path lives directly below it;
    /// otherwise the platform config directory is used.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g., `~/.config/emojis/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path for a given file or directory.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        let dir = self.config_dir()?;
        Ok(match service {
            ServiceType::Config => dir.join("config.toml"),
            ServiceType::Secret => dir.join("secret.json"),
            ServiceType::Storage => dir.join("storage"),
        })
    }

    /// Ensures the secret file exists, creating it with a template if it doesn't.
    ///
    /// On Unix the file is created with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self
            .get_path(ServiceType::Secret)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;

        if secret_path.exists() {
            return Ok(secret_path);
        }

        if let Some(parent) = secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template_config = SecretConfig {
            github: Some(GithubSecret {
                token: String::new(),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}
