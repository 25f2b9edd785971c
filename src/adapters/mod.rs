//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Key-value store implementations (in-memory, YAML files)

pub mod storage;

pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
