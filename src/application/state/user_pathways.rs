//! UserPathwaysController - the user's saved pathways and the actions on them.
//!
//! Loading state and action state are tracked separately: a failed save does
//! not put the list into an error state, and a failed fetch does not raise an
//! action banner.
//!
//! Remove, status, and progress changes are optimistic. If the service
//! rejects one, the controller re-fetches the saved list.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::abort::FetchSlot;
use super::fetch::{run_fetch, FetchOutcome};
use super::optimistic::{self, OptimisticCommand};
use super::subscription::{StateCell, Subscription};
use crate::application::PathwayService;
use crate::domain::foundation::{CourseId, PathwayId, Percentage, Timestamp};
use crate::domain::pathway::{CareerPathway, PathwayError, PathwayStatus};

/// In-flight flags and the last action error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathwayActions {
    pub saving: bool,
    pub removing: bool,
    pub updating_status: bool,
    pub updating_progress: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPathwaysState {
    pub pathways: Vec<CareerPathway>,
    pub loading: bool,
    pub error: Option<String>,
    pub actions: PathwayActions,
}

impl Default for UserPathwaysState {
    fn default() -> Self {
        Self {
            pathways: Vec::new(),
            loading: true,
            error: None,
            actions: PathwayActions::default(),
        }
    }
}

impl UserPathwaysState {
    pub fn pathway(&self, id: &PathwayId) -> Option<&CareerPathway> {
        self.pathways.iter().find(|p| &p.id == id)
    }

    fn pathway_mut(&mut self, id: &PathwayId) -> Option<&mut CareerPathway> {
        self.pathways.iter_mut().find(|p| &p.id == id)
    }

    fn replace(&mut self, updated: &CareerPathway) {
        if let Some(slot) = self.pathway_mut(&updated.id) {
            *slot = updated.clone();
        }
    }
}

pub struct UserPathwaysController {
    service: Arc<PathwayService>,
    state: StateCell<UserPathwaysState>,
    fetches: FetchSlot,
}

impl UserPathwaysController {
    pub fn new(service: Arc<PathwayService>) -> Self {
        Self {
            service,
            state: StateCell::new(UserPathwaysState::default()),
            fetches: FetchSlot::new(),
        }
    }

    pub fn snapshot(&self) -> UserPathwaysState {
        self.state.snapshot()
    }

    pub fn subscribe(&self) -> Subscription<UserPathwaysState> {
        self.state.subscribe()
    }

    /// Loads the saved pathways, superseding any fetch already in flight.
    pub async fn fetch(&self) -> FetchOutcome {
        run_fetch(
            &self.fetches,
            &self.state,
            load_saved(&self.service),
            |s| {
                s.loading = true;
                s.error = None;
            },
            |s, result| {
                s.loading = false;
                match result {
                    Ok(pathways) => s.pathways = pathways,
                    Err(err) => s.error = Some(err.user_message()),
                }
            },
        )
        .await
    }

    /// Saves a pathway and appends it to the list once the service confirms.
    pub async fn save_pathway(&self, id: &PathwayId) -> Result<(), PathwayError> {
        self.state.update(|s| {
            s.actions.saving = true;
            s.actions.error = None;
        });

        let result = match self.service.save_pathway(id).await {
            Ok(()) => self.service.get_pathway(id).await,
            Err(err) => Err(err),
        };

        self.state.update(|s| {
            s.actions.saving = false;
            match &result {
                Ok(pathway) => {
                    if s.pathway(&pathway.id).is_none() {
                        s.pathways.push(pathway.clone());
                    }
                }
                Err(err) => s.actions.error = Some(err.user_message()),
            }
        });
        if result.is_ok() {
            debug!(pathway_id = %id, "Pathway saved");
        }
        result.map(|_| ())
    }

    pub async fn remove_pathway(&self, id: &PathwayId) -> Result<(), PathwayError> {
        let command = RemovePathwayCommand {
            pathway_id: id.clone(),
        };
        self.run_command(&command, |a| &mut a.removing).await
    }

    pub async fn update_pathway_status(
        &self,
        id: &PathwayId,
        status: PathwayStatus,
    ) -> Result<CareerPathway, PathwayError> {
        let command = UpdatePathwayStatusCommand {
            pathway_id: id.clone(),
            status,
        };
        self.run_command(&command, |a| &mut a.updating_status).await
    }

    pub async fn update_course_progress(
        &self,
        pathway_id: &PathwayId,
        course_id: &CourseId,
        progress: u8,
    ) -> Result<CareerPathway, PathwayError> {
        let command = UpdateCourseProgressCommand {
            pathway_id: pathway_id.clone(),
            course_id: course_id.clone(),
            progress,
        };
        self.run_command(&command, |a| &mut a.updating_progress)
            .await
    }

    /// Clears the action error banner.
    pub fn dismiss_action_error(&self) {
        self.state.update(|s| s.actions.error = None);
    }

    /// Cancels the in-flight fetch and freezes the state. Idempotent.
    pub fn dispose(&self) {
        self.fetches.close();
        self.state.close();
    }

    pub fn is_disposed(&self) -> bool {
        self.state.is_closed()
    }

    async fn run_command<C>(
        &self,
        command: &C,
        flag: fn(&mut PathwayActions) -> &mut bool,
    ) -> Result<C::Output, PathwayError>
    where
        C: OptimisticCommand<UserPathwaysState>,
    {
        self.state.update(|s| {
            *flag(&mut s.actions) = true;
            s.actions.error = None;
        });

        let result = optimistic::execute(&self.state, &self.service, command, move || async move {
            self.fetch().await;
        })
        .await;

        self.state.update(|s| {
            *flag(&mut s.actions) = false;
            if let Err(err) = &result {
                s.actions.error = Some(err.user_message());
            }
        });
        result
    }
}

async fn load_saved(service: &PathwayService) -> Result<Vec<CareerPathway>, PathwayError> {
    let ids = service.get_user_saved_pathways().await?;
    service.get_pathways_by_ids(&ids).await
}

impl Drop for UserPathwaysController {
    fn drop(&mut self) {
        self.fetches.close();
    }
}

// === Commands ===

/// Drops the pathway from the list before the service confirms.
pub struct RemovePathwayCommand {
    pub pathway_id: PathwayId,
}

#[async_trait]
impl OptimisticCommand<UserPathwaysState> for RemovePathwayCommand {
    type Output = ();

    fn name(&self) -> &'static str {
        "remove_pathway"
    }

    fn apply(&self, state: &mut UserPathwaysState) {
        state.pathways.retain(|p| p.id != self.pathway_id);
    }

    async fn dispatch(&self, service: &PathwayService) -> Result<(), PathwayError> {
        service.remove_pathway(&self.pathway_id).await
    }
}

pub struct UpdatePathwayStatusCommand {
    pub pathway_id: PathwayId,
    pub status: PathwayStatus,
}

#[async_trait]
impl OptimisticCommand<UserPathwaysState> for UpdatePathwayStatusCommand {
    type Output = CareerPathway;

    fn name(&self) -> &'static str {
        "update_pathway_status"
    }

    fn apply(&self, state: &mut UserPathwaysState) {
        if let Some(pathway) = state.pathway_mut(&self.pathway_id) {
            pathway.status = self.status;
            pathway.last_accessed = Timestamp::now();
        }
    }

    async fn dispatch(&self, service: &PathwayService) -> Result<CareerPathway, PathwayError> {
        service
            .update_pathway_status(&self.pathway_id, self.status)
            .await
    }

    fn confirm(&self, state: &mut UserPathwaysState, output: &CareerPathway) {
        state.replace(output);
    }
}

/// Sets one course's progress and recomputes the local aggregates.
///
/// Out-of-range progress or an unknown course is left for the service to
/// reject; nothing is applied locally in that case.
pub struct UpdateCourseProgressCommand {
    pub pathway_id: PathwayId,
    pub course_id: CourseId,
    pub progress: u8,
}

#[async_trait]
impl OptimisticCommand<UserPathwaysState> for UpdateCourseProgressCommand {
    type Output = CareerPathway;

    fn name(&self) -> &'static str {
        "update_course_progress"
    }

    fn apply(&self, state: &mut UserPathwaysState) {
        let Ok(progress) = Percentage::try_new(i64::from(self.progress)) else {
            return;
        };
        if let Some(pathway) = state.pathway_mut(&self.pathway_id) {
            if pathway.set_course_progress(&self.course_id, progress).is_err() {
                debug!(course_id = %self.course_id, "Course not in local state");
            }
        }
    }

    async fn dispatch(&self, service: &PathwayService) -> Result<CareerPathway, PathwayError> {
        service
            .update_course_progress(&self.pathway_id, &self.course_id, self.progress)
            .await
    }

    fn confirm(&self, state: &mut UserPathwaysState, output: &CareerPathway) {
        state.replace(output);
    }
}
