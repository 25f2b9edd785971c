//! Integration tests for the pathway service and its controllers.
//!
//! These tests exercise the end-to-end flows:
//! 1. Optimistic updates that fail are reconciled from storage
//! 2. A newer fetch supersedes an older one
//! 3. Records survive a restart on the file-backed store
//!
//! Failures are injected through a `KeyValueStore` double.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use career_pathways::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use career_pathways::application::state::{
    FetchOutcome, UserPathwaysController, UserProfileController,
};
use career_pathways::application::PathwayService;
use career_pathways::config::ServiceConfig;
use career_pathways::domain::foundation::{CourseId, ErrorCode, PathwayId};
use career_pathways::domain::pathway::{PathwayError, PathwayStatus};
use career_pathways::domain::user::ProfileUpdate;
use career_pathways::ports::{KeyValueStore, StorageError, StorageKey};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory store with switchable write failures.
#[derive(Default)]
struct FailingStore {
    inner: InMemoryKeyValueStore,
    failing: Mutex<HashSet<StorageKey>>,
}

impl FailingStore {
    fn fail_writes_to(&self, key: StorageKey) {
        self.failing.lock().unwrap().insert(key);
    }

    fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: StorageKey) -> Result<Option<Value>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: StorageKey, value: Value) -> Result<(), StorageError> {
        if self.failing.lock().unwrap().contains(&key) {
            return Err(StorageError::Io {
                key,
                message: "disk full".to_string(),
            });
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

fn pid(s: &str) -> PathwayId {
    PathwayId::new(s).unwrap()
}

async fn seeded(store: Arc<dyn KeyValueStore>, config: ServiceConfig, saved: &[&str]) -> Arc<PathwayService> {
    let service = Arc::new(PathwayService::new(store, config));
    service.initialize().await.unwrap();
    for id in saved {
        service.save_pathway(&pid(id)).await.unwrap();
    }
    service
}

// =============================================================================
// Optimistic updates
// =============================================================================

#[tokio::test]
async fn failed_remove_restores_pathway_from_storage() {
    let store = Arc::new(FailingStore::default());
    let service = seeded(
        store.clone(),
        ServiceConfig::without_latency().with_latency(Duration::from_millis(20)),
        &["cloud-engineer", "data-scientist"],
    )
    .await;
    let controller = UserPathwaysController::new(service);
    controller.fetch().await;
    let before = controller.snapshot().pathways;

    // Record how many pathways each published state held.
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut subscription = controller.subscribe();
    let recorder = {
        let seen = seen.clone();
        tokio::spawn(async move {
            while let Some(state) = subscription.changed().await {
                seen.lock().unwrap().push(state.pathways.len());
            }
        })
    };

    store.fail_writes_to(StorageKey::SavedPathways);
    let err = controller
        .remove_pathway(&pid("cloud-engineer"))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::RemoveError);
    let after = controller.snapshot();
    assert_eq!(after.pathways, before);
    assert!(!after.actions.removing);
    assert_eq!(after.actions.error, Some(err.user_message()));
    assert!(after.error.is_none());
    assert!(seen.lock().unwrap().contains(&1), "optimistic removal was never published");

    drop(controller);
    recorder.await.unwrap();
}

#[tokio::test]
async fn failed_status_update_is_reconciled() {
    let store = Arc::new(FailingStore::default());
    let service = seeded(store.clone(), ServiceConfig::without_latency(), &["ml-engineer"]).await;
    let controller = UserPathwaysController::new(service);
    controller.fetch().await;

    store.fail_writes_to(StorageKey::PathwayCache);
    let err = controller
        .update_pathway_status(&pid("ml-engineer"), PathwayStatus::Paused)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UpdateError);
    assert_eq!(
        controller
            .snapshot()
            .pathway(&pid("ml-engineer"))
            .map(|p| p.status),
        Some(PathwayStatus::Active)
    );

    store.heal();
    controller
        .update_pathway_status(&pid("ml-engineer"), PathwayStatus::Paused)
        .await
        .unwrap();
    assert_eq!(
        controller
            .snapshot()
            .pathway(&pid("ml-engineer"))
            .map(|p| p.status),
        Some(PathwayStatus::Paused)
    );
}

#[tokio::test]
async fn course_progress_flows_into_stats() {
    let service = seeded(
        Arc::new(InMemoryKeyValueStore::new()),
        ServiceConfig::without_latency(),
        &["security-analyst"],
    )
    .await;
    let controller = UserPathwaysController::new(service.clone());
    controller.fetch().await;

    for course in ["network-fundamentals", "security-plus", "incident-response"] {
        controller
            .update_course_progress(&pid("security-analyst"), &CourseId::new(course).unwrap(), 100)
            .await
            .unwrap();
    }

    let pathway = controller.snapshot().pathways[0].clone();
    assert_eq!(pathway.completed_courses, pathway.total_courses);
    assert_eq!(pathway.overall_progress.value(), 100);

    let stats = service.get_pathway_stats().await.unwrap();
    assert_eq!(stats.saved, 1);
    assert_eq!(stats.average_progress.value(), 100);
}

// =============================================================================
// Fetch lifecycle
// =============================================================================

#[tokio::test]
async fn newer_fetch_supersedes_older_one() {
    let service = seeded(
        Arc::new(InMemoryKeyValueStore::new()),
        ServiceConfig::without_latency().with_latency(Duration::from_millis(100)),
        &["frontend-developer"],
    )
    .await;
    let controller = UserPathwaysController::new(service);

    let first = controller.fetch();
    let second = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.fetch().await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(second, FetchOutcome::Completed);
    let state = controller.snapshot();
    assert!(!state.loading);
    assert_eq!(state.pathways.len(), 1);
}

#[tokio::test]
async fn dispose_cancels_in_flight_fetch() {
    let service = seeded(
        Arc::new(InMemoryKeyValueStore::new()),
        ServiceConfig::without_latency().with_latency(Duration::from_millis(100)),
        &["frontend-developer"],
    )
    .await;
    let controller = UserProfileController::new(service);

    let fetch = controller.fetch();
    let dispose = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.dispose();
    };
    let (outcome, ()) = tokio::join!(fetch, dispose);

    assert_eq!(outcome, FetchOutcome::Disposed);
    let state = controller.snapshot();
    assert!(state.loading, "no update may land after dispose");
    assert!(state.profile.is_none());
}

#[tokio::test]
async fn empty_saved_list_resolves_cleanly() {
    let service = seeded(
        Arc::new(InMemoryKeyValueStore::new()),
        ServiceConfig::without_latency(),
        &[],
    )
    .await;
    let controller = UserPathwaysController::new(service);

    assert_eq!(controller.fetch().await, FetchOutcome::Completed);
    let state = controller.snapshot();
    assert!(state.pathways.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let first = seeded(
        Arc::new(FileKeyValueStore::new(dir.path())),
        ServiceConfig::without_latency(),
        &["data-scientist", "cloud-engineer"],
    )
    .await;
    first
        .update_user_profile(ProfileUpdate::name("Riley"))
        .await
        .unwrap();
    drop(first);

    let second = PathwayService::new(
        Arc::new(FileKeyValueStore::new(dir.path())),
        ServiceConfig::without_latency(),
    );
    let profile = second.initialize().await.unwrap();
    assert_eq!(profile.name, "Riley");
    assert_eq!(
        second.get_user_saved_pathways().await.unwrap(),
        vec![pid("data-scientist"), pid("cloud-engineer")]
    );
    assert!(dir.path().join("career_pathways.saved_pathways.yaml").exists());
}

#[tokio::test]
async fn double_save_leaves_single_entry() {
    let service = seeded(
        Arc::new(InMemoryKeyValueStore::new()),
        ServiceConfig::without_latency(),
        &["product-designer"],
    )
    .await;

    let err = service.save_pathway(&pid("product-designer")).await.unwrap_err();
    assert_eq!(err, PathwayError::AlreadySaved(pid("product-designer")));
    assert_eq!(service.get_user_saved_pathways().await.unwrap().len(), 1);
    assert_eq!(service.get_user_profile().await.unwrap().saved_pathways.len(), 1);
}
