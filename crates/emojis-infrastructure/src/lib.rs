pub mod config_service;
pub mod github_emoji_source;
pub mod local_emoji_repository;
pub mod page_state_repository;
pub mod paths;
pub mod secret_storage;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::github_emoji_source::GithubEmojiSource;
pub use crate::local_emoji_repository::LocalEmojiRepository;
pub use crate::page_state_repository::LocalPageStateRepository;
pub use crate::secret_storage::SecretStorage;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore, RecordStorage};
