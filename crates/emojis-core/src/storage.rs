//! Key-value persistence contract.
//!
//! The application persists exactly two logical records. Components never
//! touch raw keys; they go through a typed [`Record`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::emoji::Emoji;
use crate::error::Result;
use crate::page::PageStates;

/// Keys of the persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The full emoji list with per-item status.
    AllEmojis,
    /// The page state map of all categories.
    EmojisPageState,
}

impl StorageKey {
    /// Stable key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllEmojis => "--AllEmojis",
            Self::EmojisPageState => "--EmojisPageState",
        }
    }

    /// File name used by file-backed stores.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::AllEmojis => "all_emojis.json",
            Self::EmojisPageState => "emojis_page_state.json",
        }
    }
}

/// Synchronous string blob store, the equivalent of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    fn remove(&self, key: StorageKey) -> Result<()>;
}

/// A logical record: a key plus the type stored under it.
pub trait Record {
    const KEY: StorageKey;
    type Value: Serialize + DeserializeOwned;
}

/// The emoji list record.
pub struct AllEmojisRecord;

impl Record for AllEmojisRecord {
    const KEY: StorageKey = StorageKey::AllEmojis;
    type Value = Vec<Emoji>;
}

/// The page state record.
pub struct PageStatesRecord;

impl Record for PageStatesRecord {
    const KEY: StorageKey = StorageKey::EmojisPageState;
    type Value = PageStates;
}
