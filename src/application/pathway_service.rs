//! PathwayService - CRUD-style operations over the profile, the saved-pathway
//! list, and the pathway cache.
//!
//! Every public operation waits for the configured simulated latency, then
//! performs a full read-modify-write against the key-value store. Low-level
//! storage failures are re-wrapped into [`PathwayError::Storage`] carrying the
//! operation's error code.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::domain::foundation::{
    CourseId, ErrorCode, PathwayId, Percentage, Timestamp, ValidationError,
};
use crate::domain::pathway::{
    default_catalog, recommend, search, CareerPathway, PathwayError, PathwayFilters, PathwayStatus,
};
use crate::domain::user::{default_profile, InterestCapture, ProfileUpdate, UserProfile};
use crate::ports::{KeyValueStore, StorageError, StorageKey};

/// One page of the pathway catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayPage {
    pub pathways: Vec<CareerPathway>,
    pub total: usize,
    pub page: usize,
    pub has_more: bool,
}

/// Counts shown on the pathway dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayStats {
    pub saved: usize,
    pub active: usize,
    pub paused: usize,
    pub completed: usize,
    pub average_progress: Percentage,
}

/// Stateless service over an injected key-value store.
pub struct PathwayService {
    store: Arc<dyn KeyValueStore>,
    config: ServiceConfig,
}

impl PathwayService {
    pub fn new(store: Arc<dyn KeyValueStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // === Lifecycle ===

    /// Seeds the profile and pathway cache if they are absent. Idempotent.
    ///
    /// Returns the stored profile.
    pub async fn initialize(&self) -> Result<UserProfile, PathwayError> {
        self.simulate_latency().await;

        self.load_pathways(ErrorCode::FetchError).await?;

        if let Some(profile) = self
            .read::<UserProfile>(StorageKey::Profile, ErrorCode::FetchError)
            .await?
        {
            return Ok(profile);
        }

        let mut profile = default_profile();
        for id in self.load_saved_ids(ErrorCode::FetchError).await? {
            profile.add_saved_pathway(id);
        }
        self.write(StorageKey::Profile, &profile, ErrorCode::SaveError)
            .await?;
        debug!(user_id = %profile.id, "Seeded default profile");
        Ok(profile)
    }

    /// Deletes every persisted record.
    pub async fn reset(&self) -> Result<(), PathwayError> {
        for key in StorageKey::ALL {
            self.store
                .remove(key)
                .await
                .map_err(storage_error(ErrorCode::RemoveError))?;
        }
        debug!("Cleared all persisted records");
        Ok(())
    }

    // === Queries ===

    /// Returns the stored profile.
    ///
    /// # Errors
    ///
    /// `PathwayError::ProfileNotFound` if the profile has not been initialized.
    pub async fn get_user_profile(&self) -> Result<UserProfile, PathwayError> {
        self.simulate_latency().await;
        self.read(StorageKey::Profile, ErrorCode::FetchError)
            .await?
            .ok_or(PathwayError::ProfileNotFound)
    }

    /// Returns the saved pathway ids; empty when nothing was ever saved.
    pub async fn get_user_saved_pathways(&self) -> Result<Vec<PathwayId>, PathwayError> {
        self.simulate_latency().await;
        self.load_saved_ids(ErrorCode::FetchError).await
    }

    /// Returns a 1-based page of the pathway catalog.
    pub async fn get_all_pathways(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<PathwayPage, PathwayError> {
        if page == 0 {
            return Err(ValidationError::out_of_range("page", 1, i64::MAX, 0).into());
        }
        if limit == 0 {
            return Err(ValidationError::out_of_range("limit", 1, i64::MAX, 0).into());
        }
        self.simulate_latency().await;

        let all = self.load_pathways(ErrorCode::FetchError).await?;
        let total = all.len();
        let start = (page - 1).saturating_mul(limit).min(total);
        let end = start.saturating_add(limit).min(total);

        Ok(PathwayPage {
            pathways: all[start..end].to_vec(),
            total,
            page,
            has_more: end < total,
        })
    }

    /// Returns a single pathway.
    pub async fn get_pathway(&self, id: &PathwayId) -> Result<CareerPathway, PathwayError> {
        self.simulate_latency().await;
        self.load_pathways(ErrorCode::FetchError)
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| PathwayError::pathway_not_found(id.clone()))
    }

    /// Returns the pathways for `ids` in the order given; unknown ids are dropped.
    pub async fn get_pathways_by_ids(
        &self,
        ids: &[PathwayId],
    ) -> Result<Vec<CareerPathway>, PathwayError> {
        self.simulate_latency().await;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let all = self.load_pathways(ErrorCode::FetchError).await?;
        Ok(ids
            .iter()
            .filter_map(|id| all.iter().find(|p| &p.id == id).cloned())
            .collect())
    }

    /// Text search intersected with optional filters.
    pub async fn search_pathways(
        &self,
        query: &str,
        filters: &PathwayFilters,
    ) -> Result<Vec<CareerPathway>, PathwayError> {
        self.simulate_latency().await;
        let all = self.load_pathways(ErrorCode::SearchError).await?;
        let found = search(&all, query, filters);
        debug!(query, matches = found.len(), "Searched pathways");
        Ok(found)
    }

    /// Top-scoring pathways the user has not saved yet.
    pub async fn get_recommended_pathways(
        &self,
        profile: &UserProfile,
    ) -> Result<Vec<CareerPathway>, PathwayError> {
        self.simulate_latency().await;
        let all = self.load_pathways(ErrorCode::FetchError).await?;

        // The stored list is authoritative if the profile mirror lags behind.
        let mut scoring_profile = profile.clone();
        for id in self.load_saved_ids(ErrorCode::FetchError).await? {
            scoring_profile.add_saved_pathway(id);
        }

        let ranked = recommend(&scoring_profile, &all, self.config.recommendation_policy());
        debug!(count = ranked.len(), "Computed recommendations");
        Ok(ranked.into_iter().map(|s| s.pathway).collect())
    }

    /// Dashboard counts over the saved pathways.
    pub async fn get_pathway_stats(&self) -> Result<PathwayStats, PathwayError> {
        self.simulate_latency().await;
        let ids = self.load_saved_ids(ErrorCode::FetchError).await?;
        let all = self.load_pathways(ErrorCode::FetchError).await?;
        let saved: Vec<&CareerPathway> = ids
            .iter()
            .filter_map(|id| all.iter().find(|p| &p.id == id))
            .collect();

        let count = |status: PathwayStatus| saved.iter().filter(|p| p.status == status).count();
        Ok(PathwayStats {
            saved: saved.len(),
            active: count(PathwayStatus::Active),
            paused: count(PathwayStatus::Paused),
            completed: count(PathwayStatus::Completed),
            average_progress: Percentage::rounded_mean(saved.iter().map(|p| p.overall_progress)),
        })
    }

    // === Commands ===

    /// Adds a pathway to the saved list and mirrors it into the profile.
    ///
    /// # Errors
    ///
    /// - `AlreadySaved` if the id is already in the list (the list is unchanged)
    /// - `PathwayNotFound` if the id is not in the pathway cache
    pub async fn save_pathway(&self, id: &PathwayId) -> Result<(), PathwayError> {
        self.simulate_latency().await;

        let mut saved = self.load_saved_ids(ErrorCode::SaveError).await?;
        if saved.contains(id) {
            return Err(PathwayError::already_saved(id.clone()));
        }
        let exists = self
            .load_pathways(ErrorCode::SaveError)
            .await?
            .iter()
            .any(|p| &p.id == id);
        if !exists {
            return Err(PathwayError::pathway_not_found(id.clone()));
        }

        saved.push(id.clone());
        self.write(StorageKey::SavedPathways, &saved, ErrorCode::SaveError)
            .await?;

        self.mirror_into_profile(ErrorCode::SaveError, |profile| {
            profile.add_saved_pathway(id.clone())
        })
        .await?;

        debug!(pathway_id = %id, "Saved pathway");
        Ok(())
    }

    /// Removes a pathway from the saved list and profile. Absent ids are not an error.
    pub async fn remove_pathway(&self, id: &PathwayId) -> Result<(), PathwayError> {
        self.simulate_latency().await;

        let mut saved = self.load_saved_ids(ErrorCode::RemoveError).await?;
        let before = saved.len();
        saved.retain(|p| p != id);
        if saved.len() != before {
            self.write(StorageKey::SavedPathways, &saved, ErrorCode::RemoveError)
                .await?;
        }

        self.mirror_into_profile(ErrorCode::RemoveError, |profile| {
            profile.remove_saved_pathway(id)
        })
        .await?;

        debug!(pathway_id = %id, "Removed pathway");
        Ok(())
    }

    /// Sets a pathway's status and returns the updated record.
    pub async fn update_pathway_status(
        &self,
        id: &PathwayId,
        status: PathwayStatus,
    ) -> Result<CareerPathway, PathwayError> {
        self.simulate_latency().await;
        let updated = self
            .modify_pathway(id, |pathway| {
                pathway.status = status;
                pathway.last_accessed = Timestamp::now();
                Ok(())
            })
            .await?;
        debug!(pathway_id = %id, %status, "Updated pathway status");
        Ok(updated)
    }

    /// Sets a course's progress, recomputes the pathway aggregates, and returns
    /// the updated pathway.
    pub async fn update_course_progress(
        &self,
        pathway_id: &PathwayId,
        course_id: &CourseId,
        progress: u8,
    ) -> Result<CareerPathway, PathwayError> {
        let progress = Percentage::try_new(i64::from(progress))?;
        self.simulate_latency().await;
        let updated = self
            .modify_pathway(pathway_id, |pathway| {
                pathway.set_course_progress(course_id, progress)
            })
            .await?;
        debug!(
            pathway_id = %pathway_id,
            course_id = %course_id,
            overall = updated.overall_progress.value(),
            "Updated course progress"
        );
        Ok(updated)
    }

    /// Shallow-merges `update` into the stored profile and returns the result.
    pub async fn update_user_profile(
        &self,
        update: ProfileUpdate,
    ) -> Result<UserProfile, PathwayError> {
        self.simulate_latency().await;
        let mut profile: UserProfile = self
            .read(StorageKey::Profile, ErrorCode::UpdateError)
            .await?
            .ok_or(PathwayError::ProfileNotFound)?;
        profile.apply(update)?;
        self.write(StorageKey::Profile, &profile, ErrorCode::UpdateError)
            .await?;
        debug!(user_id = %profile.id, "Updated profile");
        Ok(profile)
    }

    /// Stores the result of the interest wizard on the profile.
    pub async fn save_captured_interests(
        &self,
        capture: &InterestCapture,
    ) -> Result<UserProfile, PathwayError> {
        let interests = capture.to_captured_interests(Timestamp::now());
        self.update_user_profile(ProfileUpdate::default().with_captured_interests(interests))
            .await
    }

    // === Storage helpers ===

    async fn simulate_latency(&self) {
        let latency = self.config.simulated_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    async fn read<T: DeserializeOwned>(
        &self,
        key: StorageKey,
        code: ErrorCode,
    ) -> Result<Option<T>, PathwayError> {
        let Some(value) = self.store.get(key).await.map_err(storage_error(code))? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| {
                storage_error(code)(StorageError::DeserializationFailed {
                    key,
                    message: e.to_string(),
                })
            })
    }

    async fn write<T: Serialize>(
        &self,
        key: StorageKey,
        value: &T,
        code: ErrorCode,
    ) -> Result<(), PathwayError> {
        let value = serde_json::to_value(value).map_err(|e| {
            storage_error(code)(StorageError::SerializationFailed {
                key,
                message: e.to_string(),
            })
        })?;
        self.store.set(key, value).await.map_err(storage_error(code))
    }

    async fn load_saved_ids(&self, code: ErrorCode) -> Result<Vec<PathwayId>, PathwayError> {
        let ids: Vec<PathwayId> = self
            .read(StorageKey::SavedPathways, code)
            .await?
            .unwrap_or_default();
        // Older records may carry duplicates.
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Ok(unique)
    }

    /// Loads the pathway cache, seeding it from the built-in catalog on first access.
    async fn load_pathways(&self, code: ErrorCode) -> Result<Vec<CareerPathway>, PathwayError> {
        if let Some(pathways) = self.read(StorageKey::PathwayCache, code).await? {
            return Ok(pathways);
        }
        let catalog = default_catalog().map_err(|e| PathwayError::storage(code, e))?;
        self.write(StorageKey::PathwayCache, &catalog, code).await?;
        debug!(count = catalog.len(), "Seeded pathway cache");
        Ok(catalog)
    }

    async fn modify_pathway<F>(
        &self,
        id: &PathwayId,
        mutate: F,
    ) -> Result<CareerPathway, PathwayError>
    where
        F: FnOnce(&mut CareerPathway) -> Result<(), PathwayError>,
    {
        let mut all = self.load_pathways(ErrorCode::UpdateError).await?;
        let pathway = all
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PathwayError::pathway_not_found(id.clone()))?;
        mutate(pathway)?;
        let updated = pathway.clone();
        self.write(StorageKey::PathwayCache, &all, ErrorCode::UpdateError)
            .await?;
        Ok(updated)
    }

    /// Applies `change` to the stored profile, if one exists, and writes it back
    /// when `change` reports a modification.
    async fn mirror_into_profile<F>(&self, code: ErrorCode, change: F) -> Result<(), PathwayError>
    where
        F: FnOnce(&mut UserProfile) -> bool,
    {
        let Some(mut profile) = self.read::<UserProfile>(StorageKey::Profile, code).await? else {
            return Ok(());
        };
        if change(&mut profile) {
            self.write(StorageKey::Profile, &profile, code).await?;
        }
        Ok(())
    }
}

fn storage_error(code: ErrorCode) -> impl Fn(StorageError) -> PathwayError {
    move |err| {
        warn!(%code, error = %err, "Storage operation failed");
        PathwayError::storage(code, err.to_string())
    }
}
