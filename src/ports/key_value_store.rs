//! Key-Value Store Port - the storage substrate beneath the pathway service.
//!
//! Three fixed keys partition the persisted data. Values are whole JSON
//! documents; every mutation is a full read-modify-write of one key. There
//! is no transaction across keys.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// The fixed set of records the service persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// The user's profile.
    Profile,
    /// Ordered list of saved pathway ids.
    SavedPathways,
    /// Every known pathway record.
    PathwayCache,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::Profile,
        StorageKey::SavedPathways,
        StorageKey::PathwayCache,
    ];

    /// Stable key name used by adapters.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Profile => "career_pathways.user_profile",
            StorageKey::SavedPathways => "career_pathways.saved_pathways",
            StorageKey::PathwayCache => "career_pathways.pathway_cache",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in a storage adapter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to serialize {key}: {message}")]
    SerializationFailed { key: StorageKey, message: String },

    #[error("Failed to deserialize {key}: {message}")]
    DeserializationFailed { key: StorageKey, message: String },

    #[error("IO error on {key}: {message}")]
    Io { key: StorageKey, message: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for the persistent key-value store.
///
/// Implementations must be safe to share across tasks. Writes replace the
/// whole value; concurrent writers to the same key race and the last one wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing store cannot be read
    async fn get(&self, key: StorageKey) -> Result<Option<Value>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    /// Returns `StorageError` if the value cannot be written
    async fn set(&self, key: StorageKey, value: Value) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns `StorageError` if the backing store cannot be modified
    async fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}
