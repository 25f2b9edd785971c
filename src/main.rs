//! Composition root: loads configuration, wires storage and the pathway
//! service, and prints a dashboard summary for the local user.

use std::sync::Arc;
use tracing::{info, warn};

use career_pathways::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use career_pathways::application::state::{PathwayCatalogController, UserPathwaysController};
use career_pathways::application::PathwayService;
use career_pathways::config::{AppConfig, ConfigError, StorageBackend, ValidationError};
use career_pathways::ports::KeyValueStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    config.logging.init().map_err(ConfigError::from)?;

    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        StorageBackend::File => {
            let dir = config
                .storage
                .data_dir
                .clone()
                .ok_or(ValidationError::MissingRequired("STORAGE__DATA_DIR"))
                .map_err(ConfigError::from)?;
            Arc::new(FileKeyValueStore::new(dir))
        }
    };
    info!(backend = ?config.storage.backend, "Storage ready");

    let service = Arc::new(PathwayService::new(store, config.service.clone()));
    let profile = service.initialize().await?;
    info!(user_id = %profile.id, name = %profile.name, "Profile loaded");

    let saved = UserPathwaysController::new(service.clone());
    saved.fetch().await;
    let saved_state = saved.snapshot();
    if let Some(error) = &saved_state.error {
        warn!(%error, "Could not load saved pathways");
    }

    let stats = service.get_pathway_stats().await?;
    println!("{}'s pathways", profile.name);
    println!(
        "  saved: {}  active: {}  paused: {}  completed: {}  average progress: {}%",
        stats.saved,
        stats.active,
        stats.paused,
        stats.completed,
        stats.average_progress.value()
    );
    for pathway in &saved_state.pathways {
        println!(
            "  - {} [{}] {}% ({}/{} courses)",
            pathway.title,
            pathway.status,
            pathway.overall_progress.value(),
            pathway.completed_courses,
            pathway.total_courses
        );
    }

    let catalog = PathwayCatalogController::new(service.clone());
    catalog.fetch_first_page().await;
    catalog.load_recommendations(&profile).await;
    let catalog_state = catalog.snapshot();

    println!(
        "Catalog: showing {} of {} pathways",
        catalog_state.pathways.len(),
        catalog_state.total
    );
    if catalog_state.recommendations.is_empty() {
        println!("No recommendations yet. Rate some interests to get suggestions.");
    } else {
        println!("Recommended for you:");
        for pathway in &catalog_state.recommendations {
            println!("  - {} ({})", pathway.title, pathway.target_role);
        }
    }

    saved.dispose();
    catalog.dispose();
    Ok(())
}
