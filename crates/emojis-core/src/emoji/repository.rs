//! Emoji repository trait.

use async_trait::async_trait;

use crate::emoji::model::{Emoji, EmojiStatus};
use crate::error::Result;

/// Owner of the canonical emoji list.
#[async_trait]
pub trait EmojiRepository: Send + Sync {
    /// Returns every emoji in store order.
    ///
    /// Populates the store from the remote source when nothing is persisted yet.
    async fn load_all(&self) -> Result<Vec<Emoji>>;

    /// Replaces the status of the emoji named `name`.
    ///
    /// Returns the updated record, or `None` when no emoji has that name. Nothing
    /// is written in the `None` case.
    async fn set_status(&self, name: &str, status: EmojiStatus) -> Result<Option<Emoji>>;

    /// Drops the persisted list so the next `load_all` fetches it again.
    async fn reset(&self) -> Result<()>;
}
