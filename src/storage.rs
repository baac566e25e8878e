use crate::errors::StorageError;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs;
use tracing::debug;

pub const PROGRESS_KEY: &str = "fittrack_progress";
pub const LANGUAGE_KEY: &str = "fittrack_lang";

/// String-keyed persistent storage the tracker writes its state into.
pub trait KeyValueStore: Send + Sync {
    /// `None` when the key has never been written.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// One file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        let path = self.path_for(key);
        async move {
            match fs::read_to_string(&path).await {
                Ok(value) => {
                    debug!("read {} bytes from {}", value.len(), path.display());
                    Ok(Some(value))
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(err.into()),
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        let path = self.path_for(key);
        let payload = value.to_owned();
        async move {
            fs::write(&path, payload).await?;
            Ok(())
        }
    }
}

/// In-process store; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panicking writer cannot leave a half-written String behind.
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send {
        let value = self.snapshot(key);
        async move { Ok(value) }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send {
        self.lock().insert(key.to_owned(), value.to_owned());
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("block_training_store_{}_{}", std::process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn file_store_missing_key_is_none() {
        let dir = unique_dir();
        fs::create_dir_all(&dir).await.unwrap();
        let store = FileStore::new(&dir);

        assert_eq!(store.get(PROGRESS_KEY).await.unwrap(), None);

        store.set(PROGRESS_KEY, "{}").await.unwrap();
        assert_eq!(store.get(PROGRESS_KEY).await.unwrap().as_deref(), Some("{}"));

        store.set(PROGRESS_KEY, "{\"a\":1}").await.unwrap();
        assert_eq!(
            store.get(PROGRESS_KEY).await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn file_store_write_into_missing_dir_fails() {
        let store = FileStore::new(unique_dir().join("nested"));
        let err = store.set(LANGUAGE_KEY, "en").await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[tokio::test]
    async fn memory_store_clones_share_values() {
        let store = MemoryStore::new().with_value(LANGUAGE_KEY, "pl");
        let other = store.clone();
        other.set(LANGUAGE_KEY, "ru").await.unwrap();
        assert_eq!(store.get(LANGUAGE_KEY).await.unwrap().as_deref(), Some("ru"));
    }
}
