//! PathwayCatalogController - browsing, searching, and recommendations.
//!
//! Browsing pages through the full catalog. A search replaces the list with
//! its unpaged results until the next `fetch_first_page`.

use std::sync::Arc;

use super::abort::FetchSlot;
use super::fetch::{run_fetch, FetchOutcome};
use super::subscription::{StateCell, Subscription};
use crate::application::{PathwayPage, PathwayService};
use crate::domain::pathway::{CareerPathway, PathwayFilters};
use crate::domain::user::UserProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayCatalogState {
    pub pathways: Vec<CareerPathway>,
    pub total: usize,
    /// Last page loaded; 0 before the first fetch.
    pub page: usize,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Active search query, if the list holds search results.
    pub query: Option<String>,
    pub recommendations: Vec<CareerPathway>,
    pub recommendations_error: Option<String>,
}

impl Default for PathwayCatalogState {
    fn default() -> Self {
        Self {
            pathways: Vec::new(),
            total: 0,
            page: 0,
            has_more: false,
            loading: true,
            error: None,
            query: None,
            recommendations: Vec::new(),
            recommendations_error: None,
        }
    }
}

pub struct PathwayCatalogController {
    service: Arc<PathwayService>,
    state: StateCell<PathwayCatalogState>,
    fetches: FetchSlot,
    recommendation_fetches: FetchSlot,
}

impl PathwayCatalogController {
    pub fn new(service: Arc<PathwayService>) -> Self {
        Self {
            service,
            state: StateCell::new(PathwayCatalogState::default()),
            fetches: FetchSlot::new(),
            recommendation_fetches: FetchSlot::new(),
        }
    }

    pub fn snapshot(&self) -> PathwayCatalogState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<PathwayCatalogState> {
        self.state.subscribe()
    }

    /// Loads page 1 and leaves search mode.
    pub async fn fetch_first_page(&self) -> FetchOutcome {
        let limit = self.service.config().default_page_size;
        run_fetch(
            &self.fetches,
            &self.state,
            self.service.get_all_pathways(1, limit),
            begin_loading,
            |s, result| {
                s.loading = false;
                match result {
                    Ok(page) => {
                        s.query = None;
                        s.pathways = page.pathways.clone();
                        apply_page_counters(s, &page);
                    }
                    Err(err) => s.error = Some(err.user_message()),
                }
            },
        )
        .await
    }

    /// Appends the next page. Returns `None` when there is nothing more to load.
    pub async fn load_more(&self) -> Option<FetchOutcome> {
        let current = self.state.snapshot();
        if !current.has_more || current.query.is_some() {
            return None;
        }
        let limit = self.service.config().default_page_size;
        let outcome = run_fetch(
            &self.fetches,
            &self.state,
            self.service.get_all_pathways(current.page + 1, limit),
            begin_loading,
            |s, result| {
                s.loading = false;
                match result {
                    Ok(page) => {
                        for pathway in &page.pathways {
                            if !s.pathways.iter().any(|p| p.id == pathway.id) {
                                s.pathways.push(pathway.clone());
                            }
                        }
                        apply_page_counters(s, &page);
                    }
                    Err(err) => s.error = Some(err.user_message()),
                }
            },
        )
        .await;
        Some(outcome)
    }

    pub async fn search(&self, query: &str, filters: &PathwayFilters) -> FetchOutcome {
        let query = query.trim().to_string();
        run_fetch(
            &self.fetches,
            &self.state,
            self.service.search_pathways(&query, filters),
            begin_loading,
            |s, result| {
                s.loading = false;
                match result {
                    Ok(found) => {
                        s.total = found.len();
                        s.pathways = found;
                        s.page = 1;
                        s.has_more = false;
                        s.query = Some(query.clone());
                    }
                    Err(err) => s.error = Some(err.user_message()),
                }
            },
        )
        .await
    }

    pub async fn load_recommendations(&self, profile: &UserProfile) -> FetchOutcome {
        run_fetch(
            &self.recommendation_fetches,
            &self.state,
            self.service.get_recommended_pathways(profile),
            |s| s.recommendations_error = None,
            |s, result| match result {
                Ok(found) => s.recommendations = found,
                Err(err) => s.recommendations_error = Some(err.user_message()),
            },
        )
        .await
    }

    pub fn dispose(&self) {
        self.fetches.close();
        self.recommendation_fetches.close();
        self.state.close();
    }
}

impl Drop for PathwayCatalogController {
    fn drop(&mut self) {
        self.fetches.close();
        self.recommendation_fetches.close();
    }
}

fn begin_loading(s: &mut PathwayCatalogState) {
    s.loading = true;
    s.error = None;
}

fn apply_page_counters(s: &mut PathwayCatalogState, page: &PathwayPage) {
    s.total = page.total;
    s.page = page.page;
    s.has_more = page.has_more;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::config::ServiceConfig;
    use crate::domain::pathway::Difficulty;

    async fn controller(page_size: usize) -> PathwayCatalogController {
        let config = ServiceConfig {
            default_page_size: page_size,
            ..ServiceConfig::without_latency()
        };
        let service = Arc::new(PathwayService::new(
            Arc::new(InMemoryKeyValueStore::new()),
            config,
        ));
        service.initialize().await.unwrap();
        PathwayCatalogController::new(service)
    }

    #[tokio::test]
    async fn pages_through_catalog() {
        let controller = controller(3).await;
        assert_eq!(controller.fetch_first_page().await, FetchOutcome::Completed);

        let state = controller.snapshot();
        assert_eq!(state.pathways.len(), 3);
        assert_eq!(state.page, 1);
        assert!(state.has_more);

        while controller.load_more().await.is_some() {}

        let state = controller.snapshot();
        assert_eq!(state.pathways.len(), state.total);
        assert!(!state.has_more);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn search_replaces_list_and_disables_paging() {
        let controller = controller(3).await;
        controller.fetch_first_page().await;

        let filters = PathwayFilters::default().with_difficulty(Difficulty::Beginner);
        controller.search(" designer ", &filters).await;

        let state = controller.snapshot();
        assert_eq!(state.query.as_deref(), Some("designer"));
        assert!(state.pathways.iter().all(|p| p.difficulty == Difficulty::Beginner));
        assert!(state.pathways.iter().any(|p| p.id.as_str() == "product-designer"));
        assert!(controller.load_more().await.is_none());

        controller.fetch_first_page().await;
        assert!(controller.snapshot().query.is_none());
    }

    #[tokio::test]
    async fn recommendations_are_stored_separately() {
        let controller = controller(3).await;
        let profile = controller.service.get_user_profile().await.unwrap();

        assert_eq!(
            controller.load_recommendations(&profile).await,
            FetchOutcome::Completed
        );
        // A fresh profile has no captured interests.
        let state = controller.snapshot();
        assert!(state.recommendations.is_empty());
        assert!(state.recommendations_error.is_none());
        assert!(state.pathways.is_empty());
    }
}
