//! In-memory key-value store for tests and ephemeral runs.

use emojis_core::error::{EmojisError, Result};
use emojis_core::storage::{KeyValueStore, StorageKey};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<StorageKey, String>>> {
        self.entries
            .lock()
            .map_err(|e| EmojisError::internal(format!("memory store poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.entries()?.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        self.entries()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        self.entries()?.remove(&key);
        Ok(())
    }
}
