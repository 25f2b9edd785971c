//! Storage backend configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which key-value adapter to build at startup
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Adapter to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.is_none() {
            return Err(ValidationError::MissingRequired("STORAGE__DATA_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults_to_memory() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_backend_requires_data_dir() {
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: None,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STORAGE__DATA_DIR"))
        );
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let config: StorageConfig =
            serde_json::from_str(r#"{"backend": "file", "data_dir": "/tmp/pathways"}"#).unwrap();
        assert_eq!(config.backend, StorageBackend::File);
        assert!(config.validate().is_ok());
    }
}
