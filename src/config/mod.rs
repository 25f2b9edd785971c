//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CAREER_PATHWAYS` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working in-memory setup.
//!
//! # Example
//!
//! ```no_run
//! use career_pathways::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Simulated latency: {:?}", config.service.simulated_latency());
//! ```

mod error;
mod logging;
mod service;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use service::ServiceConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Key-value store backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Pathway service behavior (latency, paging, recommendations)
    #[serde(default)]
    pub service: ServiceConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CAREER_PATHWAYS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CAREER_PATHWAYS__STORAGE__BACKEND=file` -> `storage.backend = file`
    /// - `CAREER_PATHWAYS__SERVICE__SIMULATED_LATENCY_MS=0` -> `service.simulated_latency_ms = 0`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAREER_PATHWAYS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.service.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
