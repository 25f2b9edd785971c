//! In-Memory Key-Value Store Adapter
//!
//! Holds every record in a map behind an async lock.
//! Used by tests and as the default runtime backend.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StorageError, StorageKey};

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<StorageKey, Value>>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Get the number of stored keys
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: StorageKey) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.entries.write().await.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get(StorageKey::Profile).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let store = InMemoryKeyValueStore::new();
        store
            .set(StorageKey::SavedPathways, json!(["a", "b"]))
            .await
            .unwrap();

        let loaded = store.get(StorageKey::SavedPathways).await.unwrap();
        assert_eq!(loaded, Some(json!(["a", "b"])));
    }

    #[tokio::test]
    async fn set_replaces_whole_value() {
        let store = InMemoryKeyValueStore::new();
        store.set(StorageKey::Profile, json!({"name": "A", "email": "a@x.io"})).await.unwrap();
        store.set(StorageKey::Profile, json!({"name": "B"})).await.unwrap();

        let loaded = store.get(StorageKey::Profile).await.unwrap().unwrap();
        assert_eq!(loaded, json!({"name": "B"}));
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = InMemoryKeyValueStore::new();
        store.set(StorageKey::PathwayCache, json!([])).await.unwrap();
        store.remove(StorageKey::PathwayCache).await.unwrap();
        store.remove(StorageKey::PathwayCache).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryKeyValueStore::new();
        let other = store.clone();

        let handle = tokio::spawn(async move {
            other.set(StorageKey::Profile, json!({"id": "u"})).await.unwrap();
        });
        handle.await.unwrap();

        assert_eq!(store.len().await, 1);
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
