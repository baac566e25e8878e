//! The progress store: every logged day, mirrored to the key-value backend.

use crate::errors::StorageError;
use crate::models::{ProgressData, WorkoutEntry};
use crate::storage::{KeyValueStore, PROGRESS_KEY};
use tracing::debug;

pub struct ProgressRepository<S> {
    backend: S,
    data: ProgressData,
}

impl<S: KeyValueStore> ProgressRepository<S> {
    /// Reads the stored record. A missing record is an empty store; a
    /// malformed one is an error.
    pub async fn load(backend: S) -> Result<Self, StorageError> {
        let data = match backend.get(PROGRESS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => ProgressData::default(),
        };
        debug!("loaded {} workout entries", data.len());
        Ok(Self { backend, data })
    }

    /// Inserts or replaces the entry for `key`, then writes the whole store.
    ///
    /// The in-memory map keeps the change even when the write fails.
    pub async fn save(&mut self, key: &str, entry: WorkoutEntry) -> Result<(), StorageError> {
        self.data.insert(key.to_owned(), entry);
        self.persist().await
    }

    /// Removes the entry for `key`. Returns whether one existed.
    pub async fn clear(&mut self, key: &str) -> Result<bool, StorageError> {
        let removed = self.data.remove(key).is_some();
        self.persist().await?;
        Ok(removed)
    }

    pub fn all(&self) -> &ProgressData {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&WorkoutEntry> {
        self.data.get(key)
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let payload = serde_json::to_string_pretty(&self.data)?;
        self.backend.set(PROGRESS_KEY, &payload).await
    }
}
