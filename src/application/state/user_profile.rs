//! UserProfileController - the profile page and the interest wizard's save step.

use std::sync::Arc;
use tracing::{debug, warn};

use super::abort::FetchSlot;
use super::fetch::{run_fetch, FetchOutcome};
use super::subscription::{StateCell, Subscription};
use crate::application::PathwayService;
use crate::domain::pathway::PathwayError;
use crate::domain::user::{InterestCapture, ProfileUpdate, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfileState {
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
    pub updating: bool,
    pub update_error: Option<String>,
}

impl Default for UserProfileState {
    fn default() -> Self {
        Self {
            profile: None,
            loading: true,
            error: None,
            updating: false,
            update_error: None,
        }
    }
}

pub struct UserProfileController {
    service: Arc<PathwayService>,
    state: StateCell<UserProfileState>,
    fetches: FetchSlot,
}

impl UserProfileController {
    pub fn new(service: Arc<PathwayService>) -> Self {
        Self {
            service,
            state: StateCell::new(UserProfileState::default()),
            fetches: FetchSlot::new(),
        }
    }

    pub fn snapshot(&self) -> UserProfileState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<UserProfileState> {
        self.state.subscribe()
    }

    pub async fn fetch(&self) -> FetchOutcome {
        run_fetch(
            &self.fetches,
            &self.state,
            self.service.get_user_profile(),
            |s| {
                s.loading = true;
                s.error = None;
            },
            |s, result| {
                s.loading = false;
                match result {
                    Ok(profile) => s.profile = Some(profile),
                    Err(err) => s.error = Some(err.user_message()),
                }
            },
        )
        .await
    }

    /// Applies a partial update and replaces the local profile with the stored result.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, PathwayError> {
        self.begin_update();
        let result = self.service.update_user_profile(update).await;
        self.finish_update(&result);
        result
    }

    pub async fn save_captured_interests(
        &self,
        capture: &InterestCapture,
    ) -> Result<UserProfile, PathwayError> {
        self.begin_update();
        let result = self.service.save_captured_interests(capture).await;
        self.finish_update(&result);
        result
    }

    pub fn dispose(&self) {
        self.fetches.close();
        self.state.close();
    }

    fn begin_update(&self) {
        self.state.update(|s| {
            s.updating = true;
            s.update_error = None;
        });
    }

    fn finish_update(&self, result: &Result<UserProfile, PathwayError>) {
        match result {
            Ok(profile) => debug!(user_id = %profile.id, "Profile updated"),
            Err(err) => warn!(code = %err.code(), error = %err, "Profile update failed"),
        }
        self.state.update(|s| {
            s.updating = false;
            match result {
                Ok(profile) => s.profile = Some(profile.clone()),
                Err(err) => s.update_error = Some(err.user_message()),
            }
        });
    }
}

impl Drop for UserProfileController {
    fn drop(&mut self) {
        self.fetches.close();
    }
}
