//! Page state repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::page::state::PageStates;

/// Persistence for the page state of all categories.
#[async_trait]
pub trait PageStateRepository: Send + Sync {
    /// Loads the persisted states, falling back to defaults when nothing usable
    /// is stored.
    async fn load(&self) -> Result<PageStates>;

    /// Persists the states of all categories at once.
    async fn save(&self, states: &PageStates) -> Result<()>;
}
