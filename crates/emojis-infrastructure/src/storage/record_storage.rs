//! Typed access to the persisted records.

use emojis_core::error::{EmojisError, Result};
use emojis_core::storage::{KeyValueStore, Record};
use std::sync::Arc;
use tokio::task;

/// Typed facade over a [`KeyValueStore`].
///
/// Reads never fail: a record that cannot be read or parsed is reported as
/// absent and logged, so callers fall back to defaults or a fresh fetch.
#[derive(Clone)]
pub struct RecordStorage {
    store: Arc<dyn KeyValueStore>,
}

impl RecordStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get<R: Record>(&self) -> Option<R::Value> {
        let raw = match self.store.get(R::KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = R::KEY.as_str(), "Failed to read record: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = R::KEY.as_str(), "Ignoring unparsable record: {}", e);
                None
            }
        }
    }

    pub fn set<R: Record>(&self, value: &R::Value) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(R::KEY, &json)
    }

    pub fn remove<R: Record>(&self) -> Result<()> {
        self.store.remove(R::KEY)
    }

    /// [`Self::get`] on the blocking thread pool.
    pub async fn load<R>(&self) -> Option<R::Value>
    where
        R: Record + 'static,
        R::Value: Send + 'static,
    {
        let storage = self.clone();
        match task::spawn_blocking(move || storage.get::<R>()).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = R::KEY.as_str(), "Record read task failed: {}", e);
                None
            }
        }
    }

    /// [`Self::set`] on the blocking thread pool.
    pub async fn save<R>(&self, value: &R::Value) -> Result<()>
    where
        R: Record + 'static,
        R::Value: Clone + Send + 'static,
    {
        let storage = self.clone();
        let value = value.clone();
        task::spawn_blocking(move || storage.set::<R>(&value))
            .await
            .map_err(|e| EmojisError::io(format!("Failed to spawn blocking task: {}", e)))?
    }

    /// [`Self::remove`] on the blocking thread pool.
    pub async fn delete<R>(&self) -> Result<()>
    where
        R: Record + 'static,
    {
        let storage = self.clone();
        task::spawn_blocking(move || storage.remove::<R>())
            .await
            .map_err(|e| EmojisError::io(format!("Failed to spawn blocking task: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use emojis_core::page::PageStates;
    use emojis_core::storage::{AllEmojisRecord, PageStatesRecord, StorageKey};
    use emojis_core::{Emoji, EmojiStatus};

    fn storage() -> (Arc<MemoryKeyValueStore>, RecordStorage) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let records = RecordStorage::new(store.clone());
        (store, records)
    }

    #[test]
    fn test_round_trip_each_record() {
        let (_, records) = storage();
        let emojis = vec![Emoji::new("a", "u").with_status(EmojiStatus::Removed)];
        let mut pages = PageStates::default();
        pages.removed.page_index = 2;

        records.set::<AllEmojisRecord>(&emojis).unwrap();
        records.set::<PageStatesRecord>(&pages).unwrap();

        assert_eq!(records.get::<AllEmojisRecord>(), Some(emojis));
        assert_eq!(records.get::<PageStatesRecord>(), Some(pages));
    }

    #[test]
    fn test_records_use_distinct_keys() {
        let (store, records) = storage();
        records.set::<PageStatesRecord>(&PageStates::default()).unwrap();

        assert!(store.get(StorageKey::EmojisPageState).unwrap().is_some());
        assert!(store.get(StorageKey::AllEmojis).unwrap().is_none());
        assert_eq!(records.get::<AllEmojisRecord>(), None);
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let (store, records) = storage();
        store.set(StorageKey::AllEmojis, "{ not json").unwrap();
        store.set(StorageKey::EmojisPageState, r#"{"general": 1}"#).unwrap();

        assert_eq!(records.get::<AllEmojisRecord>(), None);
        assert_eq!(records.get::<PageStatesRecord>(), None);
    }

    #[test]
    fn test_remove() {
        let (_, records) = storage();
        records.set::<AllEmojisRecord>(&Vec::new()).unwrap();
        records.remove::<AllEmojisRecord>().unwrap();
        assert_eq!(records.get::<AllEmojisRecord>(), None);
    }

    #[tokio::test]
    async fn test_async_access_runs_off_the_runtime() {
        let (_, records) = storage();
        let emojis = vec![Emoji::new("b", "u")];

        assert_eq!(records.load::<AllEmojisRecord>().await, None);
        records.save::<AllEmojisRecord>(&emojis).await.unwrap();
        assert_eq!(records.load::<AllEmojisRecord>().await, Some(emojis));

        records.delete::<AllEmojisRecord>().await.unwrap();
        assert_eq!(records.load::<AllEmojisRecord>().await, None);
    }
}
