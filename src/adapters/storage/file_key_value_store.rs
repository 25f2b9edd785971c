//! File-based Key-Value Store Adapter
//!
//! Stores each key as a YAML document in a data directory.

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, StorageError, StorageKey};

/// File-backed key-value store
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_path`. The directory is created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the YAML file holding `key`
    pub fn file_path(&self, key: StorageKey) -> PathBuf {
        self.base_path.join(format!("{}.yaml", key.as_str()))
    }

    async fn ensure_dir(&self, key: StorageKey) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| io_error(key, e))
    }
}

fn io_error(key: StorageKey, e: std::io::Error) -> StorageError {
    StorageError::Io {
        key,
        message: e.to_string(),
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: StorageKey) -> Result<Option<Value>, StorageError> {
        let yaml = match fs::read_to_string(self.file_path(key)).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(key, e)),
        };

        let value = serde_yaml::from_str(&yaml).map_err(|e| StorageError::DeserializationFailed {
            key,
            message: e.to_string(),
        })?;

        Ok(Some(value))
    }

    async fn set(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
        self.ensure_dir(key).await?;

        let yaml = serde_yaml::to_string(&value).map_err(|e| StorageError::SerializationFailed {
            key,
            message: e.to_string(),
        })?;

        fs::write(self.file_path(key), yaml)
            .await
            .map_err(|e| io_error(key, e))
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get(StorageKey::Profile).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_round_trips_nested_documents() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));
        let value = json!({
            "id": "u1",
            "savedPathways": ["a", "b"],
            "achievements": {"dayStreak": 3}
        });

        store.set(StorageKey::Profile, value.clone()).await.unwrap();

        assert!(store.file_path(StorageKey::Profile).exists());
        assert_eq!(store.get(StorageKey::Profile).await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn file_store_remove_deletes_file() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        store.set(StorageKey::SavedPathways, json!(["x"])).await.unwrap();

        store.remove(StorageKey::SavedPathways).await.unwrap();
        store.remove(StorageKey::SavedPathways).await.unwrap();

        assert_eq!(store.get(StorageKey::SavedPathways).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_reports_corrupt_yaml() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        std::fs::write(store.file_path(StorageKey::PathwayCache), "{ not: [valid").unwrap();

        let result = store.get(StorageKey::PathwayCache).await;
        assert!(matches!(
            result,
            Err(StorageError::DeserializationFailed { .. })
        ));
    }
}
