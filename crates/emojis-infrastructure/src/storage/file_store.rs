//! File-backed key-value store with atomic writes.
//!
//! Each key is stored as its own JSON file inside one directory. Writes go to a
//! temporary file that is fsynced and renamed over the target while an
//! exclusive lock file is held.

use emojis_core::error::{EmojisError, Result};
use emojis_core::storage::{KeyValueStore, StorageKey};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Directory of one file per [`StorageKey`].
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    fn temp_path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!(".{}.tmp", key.file_name()))
    }
}

impl KeyValueStore for FileKeyValueStore {
    /// Missing and empty files both read as absent.
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let _lock = FileLock::acquire(&self.path_for(key))?;

        let tmp_path = self.temp_path_for(key);
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }

        let _lock = FileLock::acquire(&path)?;
        fs::remove_file(&path)?;
        Ok(())
    }
}

/// Exclusive lock on a sibling `.lock` file, released when dropped.
///
/// The lock file itself is never deleted: a waiter must end up locking the
/// same inode as the current holder.
struct FileLock {
    _file: File,
}

impl FileLock {
    /// Acquires an exclusive lock next to `path`.
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive().map_err(|e| {
            EmojisError::io(format!(
                "Failed to acquire lock {}: {}",
                lock_path.display(),
                e
            ))
        })?;

        Ok(FileLock { _file: file })
    }
}
