//! Remote emoji source trait.

use async_trait::async_trait;

use crate::error::Result;

/// An entry as delivered by the remote catalogue, before any status is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEmoji {
    pub name: String,
    pub image_url: String,
}

impl RemoteEmoji {
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

/// The remote catalogue the store is populated from on first use.
#[async_trait]
pub trait EmojiSource: Send + Sync {
    /// Fetches the full catalogue in source order.
    ///
    /// Fails with `EmojisError::Transport` when the request cannot be completed.
    /// Implementations must not retry.
    async fn fetch_all(&self) -> Result<Vec<RemoteEmoji>>;
}
