//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Simulated latency exceeds maximum allowed (10000 ms)")]
    LatencyTooLarge,

    #[error("Page size must be between 1 and 100")]
    InvalidPageSize,

    #[error("Recommendation limit must be at least 1")]
    InvalidRecommendationLimit,

    #[error("Recommendation threshold must be a finite, non-negative number")]
    InvalidRecommendationThreshold,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
