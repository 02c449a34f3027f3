//! Page state repository backed by local storage.

use async_trait::async_trait;
use emojis_core::error::Result;
use emojis_core::page::{PageStateRepository, PageStates};
use emojis_core::storage::PageStatesRecord;

use crate::storage::RecordStorage;

/// Keeps the page state of every category in the `EmojisPageState` record.
pub struct LocalPageStateRepository {
    storage: RecordStorage,
    default_page_size: usize,
}

impl LocalPageStateRepository {
    pub fn new(storage: RecordStorage, default_page_size: usize) -> Self {
        Self {
            storage,
            default_page_size,
        }
    }
}

#[async_trait]
impl PageStateRepository for LocalPageStateRepository {
    /// Missing or unreadable state is replaced by defaults, which are written
    /// back immediately. A category with a page size the selector does not
    /// offer is reset on its own.
    async fn load(&self) -> Result<PageStates> {
        if let Some(mut states) = self.storage.load::<PageStatesRecord>().await {
            let repaired = states.repair(self.default_page_size);
            if !repaired.is_empty() {
                tracing::warn!(?repaired, "Reset page state with an unsupported page size");
                self.storage.save::<PageStatesRecord>(&states).await?;
            }
            return Ok(states);
        }

        let defaults = PageStates::with_page_size(self.default_page_size);
        self.storage.save::<PageStatesRecord>(&defaults).await?;
        tracing::debug!("Initialized page state with defaults");
        Ok(defaults)
    }

    async fn save(&self, states: &PageStates) -> Result<()> {
        self.storage.save::<PageStatesRecord>(states).await
    }
}
