//! Emoji domain: records, status, and the traits that load and mutate them.

pub mod model;
pub mod repository;
pub mod source;

pub use model::{Emoji, EmojiStatus};
pub use repository::EmojiRepository;
pub use source::{EmojiSource, RemoteEmoji};
