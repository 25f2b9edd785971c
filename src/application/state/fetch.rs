//! Shared fetch routine for controllers.

use std::future::Future;
use tracing::{debug, warn};

use super::abort::{run_abortable, FetchSlot};
use super::subscription::StateCell;
use crate::domain::pathway::PathwayError;

/// How a controller fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result, success or failure, was written to state.
    Completed,
    /// A newer fetch started first; this result was discarded.
    Superseded,
    /// The controller was disposed; nothing was written.
    Disposed,
}

/// Runs `load` as the slot's current fetch.
///
/// `begin` marks the state as loading. `finish` receives the result only if
/// this fetch is still current when `load` resolves.
pub(crate) async fn run_fetch<S, T, Fut, B, F>(
    slot: &FetchSlot,
    cell: &StateCell<S>,
    load: Fut,
    begin: B,
    finish: F,
) -> FetchOutcome
where
    S: Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, PathwayError>>,
    B: FnOnce(&mut S),
    F: FnOnce(&mut S, Result<T, PathwayError>),
{
    let ticket = slot.begin();
    if ticket.signal().is_aborted() {
        return FetchOutcome::Disposed;
    }
    cell.update(begin);

    let Some(result) = run_abortable(ticket.signal(), load).await else {
        return abandoned(slot, ticket.generation());
    };
    if !slot.is_current(&ticket) {
        return abandoned(slot, ticket.generation());
    }

    if let Err(err) = &result {
        warn!(code = %err.code(), error = %err, "Fetch failed");
    }
    cell.update(|state| finish(state, result));
    FetchOutcome::Completed
}

fn abandoned(slot: &FetchSlot, generation: u64) -> FetchOutcome {
    if slot.is_closed() {
        FetchOutcome::Disposed
    } else {
        debug!(generation, "Fetch superseded");
        FetchOutcome::Superseded
    }
}
