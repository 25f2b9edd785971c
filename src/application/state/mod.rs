//! Controllers that hold UI-facing state over the pathway service.
//!
//! Each controller publishes its state through a [`StateCell`]; observers
//! subscribe and call `dispose()` when they detach. Fetches are cancellable
//! and a newer fetch supersedes an older one. Mutations are not cancellable.

pub mod abort;
mod fetch;
pub mod optimistic;
mod pathway_catalog;
pub mod subscription;
mod user_pathways;
mod user_profile;

pub use abort::{run_abortable, AbortController, AbortSignal, FetchSlot, FetchTicket};
pub use fetch::FetchOutcome;
pub use optimistic::OptimisticCommand;
pub use pathway_catalog::{PathwayCatalogController, PathwayCatalogState};
pub use subscription::{StateCell, Subscription};
pub use user_pathways::{
    PathwayActions, RemovePathwayCommand, UpdateCourseProgressCommand, UpdatePathwayStatusCommand,
    UserPathwaysController, UserPathwaysState,
};
pub use user_profile::{UserProfileController, UserProfileState};
