//! Storage layer: key-value stores and the typed record facade over them.

mod file_store;
mod memory_store;
mod record_storage;

pub use file_store::FileKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
pub use record_storage::RecordStorage;
