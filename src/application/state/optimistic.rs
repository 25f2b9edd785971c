//! Optimistic commands.
//!
//! A command predicts its effect on local state (`apply`), performs the real
//! effect through the service (`dispatch`), and on success may fold the
//! authoritative result back in (`confirm`). On failure the caller-supplied
//! reconcile step re-reads state from the service. There is no inverse
//! operation: reconciling is the only way back.

use async_trait::async_trait;
use std::future::Future;
use tracing::{debug, warn};

use super::subscription::StateCell;
use crate::application::PathwayService;
use crate::domain::pathway::PathwayError;

#[async_trait]
pub trait OptimisticCommand<S: Send + 'static>: Send + Sync {
    type Output: Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies the predicted change to local state.
    fn apply(&self, state: &mut S);

    /// Performs the change against the service.
    async fn dispatch(&self, service: &PathwayService) -> Result<Self::Output, PathwayError>;

    /// Folds the service's result into local state.
    fn confirm(&self, _state: &mut S, _output: &Self::Output) {}
}

/// Runs `command` against `cell`, calling `reconcile` if dispatch fails.
///
/// The dispatch error is returned after reconciliation completes.
pub async fn execute<S, C, R, Fut>(
    cell: &StateCell<S>,
    service: &PathwayService,
    command: &C,
    reconcile: R,
) -> Result<C::Output, PathwayError>
where
    S: Clone + Send + Sync + 'static,
    C: OptimisticCommand<S> + ?Sized,
    R: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    cell.update(|state| command.apply(state));

    match command.dispatch(service).await {
        Ok(output) => {
            cell.update(|state| command.confirm(state, &output));
            debug!(command = command.name(), "Optimistic update confirmed");
            Ok(output)
        }
        Err(err) => {
            warn!(
                command = command.name(),
                code = %err.code(),
                error = %err,
                "Optimistic update failed, reconciling"
            );
            reconcile().await;
            Err(err)
        }
    }
}
