//! Wires configuration, secrets, storage and the GitHub source together.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use emojis_application::EmojiPageService;
use emojis_core::config::AppConfig;
use emojis_core::emoji::{EmojiSource, RemoteEmoji};
use emojis_core::error::EmojisError;
use emojis_core::storage::KeyValueStore;
use emojis_infrastructure::paths::{EmojisPaths, ServiceType};
use emojis_infrastructure::{
    ConfigService, FileKeyValueStore, GithubEmojiSource, LocalEmojiRepository,
    LocalPageStateRepository, MemoryKeyValueStore, RecordStorage, SecretStorage,
};

use crate::GlobalArgs;

pub struct App {
    pub config: AppConfig,
    pub service: EmojiPageService,
}

impl App {
    pub fn bootstrap(args: &GlobalArgs) -> Result<Self> {
        let paths = EmojisPaths::new(args.home.as_deref());
        let config = ConfigService::new(&paths)?
            .load()
            .context("Failed to load config.toml")?;

        let store: Arc<dyn KeyValueStore> = if args.ephemeral {
            tracing::debug!("Using in-memory storage");
            Arc::new(MemoryKeyValueStore::new())
        } else {
            let store = FileKeyValueStore::new(paths.get_path(ServiceType::Storage)?);
            tracing::debug!(dir = %store.dir().display(), "Using file storage");
            Arc::new(store)
        };
        let records = RecordStorage::new(store);

        let emojis = Arc::new(LocalEmojiRepository::new(
            records.clone(),
            source(&paths, &config, |name| std::env::var(name).ok())?,
        ));
        let page_states = Arc::new(LocalPageStateRepository::new(
            records,
            config.view.default_page_size,
        ));

        Ok(Self {
            service: EmojiPageService::new(emojis, page_states),
            config,
        })
    }
}

/// The GitHub source, or one that reports the missing token once the
/// catalogue actually has to be fetched. Cached data stays usable without a
/// token.
///
/// Without a token, an empty `secret.json` template is created for the user
/// to fill in.
fn source(
    paths: &EmojisPaths,
    config: &AppConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn EmojiSource>> {
    let secrets = SecretStorage::new(paths)?;
    match secrets.github_token_with(env) {
        Ok(token) => {
            let source = GithubEmojiSource::new(&config.source, token)?;
            tracing::debug!(endpoint = source.endpoint(), "Using GitHub emoji source");
            Ok(Arc::new(source))
        }
        Err(e) if e.is_config() => {
            tracing::debug!("No GitHub token available: {}", e);
            match paths.ensure_secret_file() {
                Ok(path) => tracing::debug!(path = %path.display(), "Secret file template in place"),
                Err(err) => tracing::warn!("Failed to create secret file template: {}", err),
            }
            Ok(Arc::new(UnavailableSource {
                reason: format!("{} (looked in {})", e, secrets.path().display()),
            }))
        }
        Err(e) => Err(e.into()),
    }
}

struct UnavailableSource {
    reason: String,
}

#[async_trait]
impl EmojiSource for UnavailableSource {
    async fn fetch_all(&self) -> emojis_core::Result<Vec<RemoteEmoji>> {
        Err(EmojisError::config(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[tokio::test]
    async fn test_missing_token_creates_template_and_defers_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EmojisPaths::new(Some(temp_dir.path()));

        let source = source(&paths, &AppConfig::default(), no_env).unwrap();

        let secret_path = temp_dir.path().join("secret.json");
        let template: emojis_core::config::SecretConfig =
            serde_json::from_str(&std::fs::read_to_string(&secret_path).unwrap()).unwrap();
        assert_eq!(template.github_token(), None);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&secret_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        let err = source.fetch_all().await.unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_existing_secret_file_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let secret_path = temp_dir.path().join("secret.json");
        std::fs::write(&secret_path, r#"{"github": {"token": "abc"}}"#).unwrap();
        let paths = EmojisPaths::new(Some(temp_dir.path()));

        source(&paths, &AppConfig::default(), no_env).unwrap();

        assert_eq!(
            std::fs::read_to_string(&secret_path).unwrap(),
            r#"{"github": {"token": "abc"}}"#
        );
    }
}
