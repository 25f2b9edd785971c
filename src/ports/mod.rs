//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `KeyValueStore` - Persistent storage for the profile, saved list, and pathway cache

mod key_value_store;

pub use key_value_store::{KeyValueStore, StorageError, StorageKey};
