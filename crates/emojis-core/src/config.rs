//! Configuration models.
//!
//! `AppConfig` is read from `config.toml`; `SecretConfig` from `secret.json`.

use serde::{Deserialize, Serialize};

use crate::page::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

/// Default remote catalogue.
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/emojis";

/// Lower bound for the search debounce window.
pub const MIN_DEBOUNCE_MS: u64 = 300;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// Clamps values that are out of range instead of rejecting the file.
    pub fn normalized(mut self) -> Self {
        self.view.debounce_ms = self.view.debounce_ms.max(MIN_DEBOUNCE_MS);
        if !PAGE_SIZE_OPTIONS.contains(&self.view.default_page_size) {
            self.view.default_page_size = DEFAULT_PAGE_SIZE;
        }
        if self.source.timeout_secs == 0 {
            self.source.timeout_secs = SourceConfig::default().timeout_secs;
        }
        self
    }
}

/// Where and how the emoji catalogue is fetched.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: "emojis-cli".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewConfig {
    pub debounce_ms: u64,
    pub default_page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: MIN_DEBOUNCE_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubSecret>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GithubSecret {
    pub token: String,
}

impl SecretConfig {
    /// The GitHub token, if one is configured and non-empty.
    pub fn github_token(&self) -> Option<&str> {
        self.github
            .as_ref()
            .map(|github| github.token.trim())
            .filter(|token| !token.is_empty())
    }
}
