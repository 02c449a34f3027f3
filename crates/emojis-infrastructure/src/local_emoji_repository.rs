//! Emoji repository backed by local storage and populated from a remote source.

use async_trait::async_trait;
use emojis_core::emoji::{Emoji, EmojiRepository, EmojiSource, EmojiStatus, RemoteEmoji};
use emojis_core::error::{EmojisError, Result};
use emojis_core::storage::AllEmojisRecord;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::RecordStorage;

/// Keeps the emoji list in the `AllEmojis` record.
///
/// The first `load_all` on an empty store fetches the catalogue, tags every
/// entry `General`, and persists it. Every mutation is a full read-modify-write
/// of the list; the mutex serializes them within one process.
pub struct LocalEmojiRepository {
    storage: RecordStorage,
    source: Arc<dyn EmojiSource>,
    lock: Mutex<()>,
}

impl LocalEmojiRepository {
    pub fn new(storage: RecordStorage, source: Arc<dyn EmojiSource>) -> Self {
        Self {
            storage,
            source,
            lock: Mutex::new(()),
        }
    }

    /// Loads the persisted list or populates it. Caller must hold `lock`.
    async fn load_or_populate(&self) -> Result<Vec<Emoji>> {
        if let Some(emojis) = self.storage.load::<AllEmojisRecord>().await {
            return Ok(emojis);
        }

        let fetched = self.source.fetch_all().await.inspect_err(|e| {
            tracing::error!("Failed to fetch emoji catalogue: {}", e);
        })?;
        let emojis = into_store_order(fetched);
        self.storage.save::<AllEmojisRecord>(&emojis).await?;

        tracing::info!(count = emojis.len(), "Populated emoji store from remote source");
        Ok(emojis)
    }
}

/// Tags fetched entries `General`, keeping the first occurrence of a name.
fn into_store_order(fetched: Vec<RemoteEmoji>) -> Vec<Emoji> {
    let mut seen = HashSet::new();
    fetched
        .into_iter()
        .filter(|remote| seen.insert(remote.name.clone()))
        .map(|remote| Emoji::new(remote.name, remote.image_url))
        .collect()
}

#[async_trait]
impl EmojiRepository for LocalEmojiRepository {
    async fn load_all(&self) -> Result<Vec<Emoji>> {
        let _guard = self.lock.lock().await;
        self.load_or_populate().await
    }

    async fn set_status(&self, name: &str, status: EmojiStatus) -> Result<Option<Emoji>> {
        if name.is_empty() {
            return Err(EmojisError::invalid_argument("emoji name must not be empty"));
        }

        let _guard = self.lock.lock().await;
        let mut emojis = self.load_or_populate().await?;

        let Some(emoji) = emojis.iter_mut().find(|emoji| emoji.name == name) else {
            tracing::warn!(emoji = name, %status, "Status change for unknown emoji ignored");
            return Ok(None);
        };
        let previous = emoji.status;
        emoji.status = status;
        let updated = emoji.clone();

        self.storage.save::<AllEmojisRecord>(&emojis).await?;
        tracing::info!(emoji = name, from = %previous, to = %status, "Emoji status changed");
        Ok(Some(updated))
    }

    async fn reset(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.storage.delete::<AllEmojisRecord>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use emojis_core::storage::StorageKey;
    use emojis_core::storage::KeyValueStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        entries: Vec<RemoteEmoji>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockSource {
        fn with(names: &[&str]) -> Self {
            Self {
                entries: names
                    .iter()
                    .map(|name| RemoteEmoji::new(*name, format!("https://example.com/{name}.png")))
                    .collect(),
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                entries: Vec::new(),
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EmojiSource for MockSource {
        async fn fetch_all(&self) -> Result<Vec<RemoteEmoji>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EmojisError::transport("connection refused"));
            }
            Ok(self.entries.clone())
        }
    }

    fn repository(source: Arc<MockSource>) -> (Arc<MemoryKeyValueStore>, LocalEmojiRepository) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let repository = LocalEmojiRepository::new(RecordStorage::new(store.clone()), source);
        (store, repository)
    }

    #[tokio::test]
    async fn test_first_load_fetches_and_persists() {
        let source = Arc::new(MockSource::with(&["b", "a", "c"]));
        let (store, repository) = repository(source.clone());

        let emojis = repository.load_all().await.unwrap();

        let names: Vec<_> = emojis.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert!(emojis.iter().all(|e| e.status == EmojiStatus::General));
        assert!(store.get(StorageKey::AllEmojis).unwrap().is_some());

        repository.load_all().await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced_and_nothing_persisted() {
        let source = Arc::new(MockSource::failing());
        let (store, repository) = repository(source.clone());

        let err = repository.load_all().await.unwrap_err();

        assert!(err.is_transport());
        assert!(store.get(StorageKey::AllEmojis).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_names_keep_first() {
        let source = Arc::new(MockSource {
            entries: vec![
                RemoteEmoji::new("a", "first"),
                RemoteEmoji::new("a", "second"),
            ],
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let (_, repository) = repository(source);

        let emojis = repository.load_all().await.unwrap();
        assert_eq!(emojis.len(), 1);
        assert_eq!(emojis[0].image_url, "first");
    }

    #[tokio::test]
    async fn test_set_status_persists() {
        let source = Arc::new(MockSource::with(&["a", "b"]));
        let (_, repository) = repository(source);

        let updated = repository
            .set_status("b", EmojiStatus::Favorite)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, EmojiStatus::Favorite);

        let emojis = repository.load_all().await.unwrap();
        assert_eq!(emojis[0].status, EmojiStatus::General);
        assert_eq!(emojis[1].status, EmojiStatus::Favorite);
    }

    #[tokio::test]
    async fn test_set_status_unknown_name_is_noop() {
        let source = Arc::new(MockSource::with(&["a"]));
        let (store, repository) = repository(source);
        repository.load_all().await.unwrap();
        let before = store.get(StorageKey::AllEmojis).unwrap();

        let result = repository.set_status("zzz", EmojiStatus::Removed).await.unwrap();

        assert!(result.is_none());
        assert_eq!(store.get(StorageKey::AllEmojis).unwrap(), before);
    }

    #[tokio::test]
    async fn test_set_status_rejects_empty_name() {
        let source = Arc::new(MockSource::with(&["a"]));
        let (_, repository) = repository(source);
        let err = repository.set_status("", EmojiStatus::Removed).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_corrupt_store_refetches() {
        let source = Arc::new(MockSource::with(&["a"]));
        let (store, repository) = repository(source.clone());
        store.set(StorageKey::AllEmojis, "garbage").unwrap();

        let emojis = repository.load_all().await.unwrap();

        assert_eq!(emojis.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reset_forces_refetch() {
        let source = Arc::new(MockSource::with(&["a"]));
        let (_, repository) = repository(source.clone());
        repository.set_status("a", EmojiStatus::Removed).await.unwrap();

        repository.reset().await.unwrap();
        let emojis = repository.load_all().await.unwrap();

        assert_eq!(emojis[0].status, EmojiStatus::General);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
