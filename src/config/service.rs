//! Pathway service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::pathway::RecommendationPolicy;

const MAX_LATENCY_MS: u64 = 10_000;

/// Service configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Artificial delay applied before every service operation
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Page size used by the catalog browser
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Maximum number of recommendations returned
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Scores must exceed this to be recommended
    #[serde(default = "default_recommendation_threshold")]
    pub recommendation_threshold: f64,
}

impl ServiceConfig {
    /// Configuration with no simulated latency (tests, batch tools)
    pub fn without_latency() -> Self {
        Self {
            simulated_latency_ms: 0,
            ..Self::default()
        }
    }

    /// Builder: set the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency_ms = latency.as_millis() as u64;
        self
    }

    /// Get simulated latency as Duration
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    /// Recommendation cut-off and size
    pub fn recommendation_policy(&self) -> RecommendationPolicy {
        RecommendationPolicy {
            threshold: self.recommendation_threshold,
            limit: self.recommendation_limit,
        }
    }

    /// Validate service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.simulated_latency_ms > MAX_LATENCY_MS {
            return Err(ValidationError::LatencyTooLarge);
        }
        if self.default_page_size == 0 || self.default_page_size > 100 {
            return Err(ValidationError::InvalidPageSize);
        }
        if self.recommendation_limit == 0 {
            return Err(ValidationError::InvalidRecommendationLimit);
        }
        if !self.recommendation_threshold.is_finite() || self.recommendation_threshold < 0.0 {
            return Err(ValidationError::InvalidRecommendationThreshold);
        }
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
            default_page_size: default_page_size(),
            recommendation_limit: default_recommendation_limit(),
            recommendation_threshold: default_recommendation_threshold(),
        }
    }
}

fn default_latency_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    6
}

fn default_recommendation_limit() -> usize {
    5
}

fn default_recommendation_threshold() -> f64 {
    2.0
}
