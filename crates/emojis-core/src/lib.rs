pub mod config;
pub mod emoji;
pub mod error;
pub mod page;
pub mod route;
pub mod storage;
pub mod transition;

// Re-export common error type
pub use error::{EmojisError, Result};

pub use emoji::{Emoji, EmojiStatus};
