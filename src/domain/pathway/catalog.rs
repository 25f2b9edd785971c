//! Built-in pathway catalog used to seed an empty pathway cache.

use once_cell::sync::Lazy;

use super::{recompute_pathway_aggregates, CareerPathway};

const SEED_PATHWAYS: &str = include_str!("seed/pathways.json");

static CATALOG: Lazy<Result<Vec<CareerPathway>, String>> = Lazy::new(|| {
    serde_json::from_str::<Vec<CareerPathway>>(SEED_PATHWAYS)
        .map(|pathways| pathways.into_iter().map(recompute_pathway_aggregates).collect())
        .map_err(|e| e.to_string())
});

/// Returns the seed catalog with aggregates computed.
///
/// # Errors
///
/// Returns the parse error message if the embedded catalog is malformed.
pub fn default_catalog() -> Result<Vec<CareerPathway>, String> {
    CATALOG.clone()
}
