//! Cooperative cancellation for fetches.
//!
//! Only fetches are cancellable. Mutations run to completion once dispatched.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Owner side of a cancellation flag.
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<bool>,
}

impl AbortController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Flags every signal handed out by this controller. Idempotent.
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation flag.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once aborted. Never resolves if the controller is dropped first.
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|aborted| *aborted).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Runs `fut` until it completes or `signal` fires, whichever comes first.
///
/// Returns `None` when aborted.
pub async fn run_abortable<F>(signal: &AbortSignal, fut: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = signal.aborted() => None,
        output = fut => Some(output),
    }
}

/// Handle for one fetch started through a [`FetchSlot`].
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    signal: AbortSignal,
}

impl FetchTicket {
    pub fn signal(&self) -> &AbortSignal {
        &self.signal
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct SlotState {
    generation: u64,
    controller: Option<AbortController>,
    closed: bool,
}

/// Tracks the latest fetch of a controller.
///
/// Starting a fetch aborts the one before it, so at most one fetch result
/// is ever applied per slot.
#[derive(Debug, Default)]
pub struct FetchSlot {
    state: Mutex<SlotState>,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts the in-flight fetch, if any, and starts a new one.
    ///
    /// After `close()` the returned ticket is already aborted.
    pub fn begin(&self) -> FetchTicket {
        let mut state = self.lock();
        if let Some(previous) = state.controller.take() {
            previous.abort();
        }
        state.generation += 1;

        let controller = AbortController::new();
        if state.closed {
            controller.abort();
        }
        let ticket = FetchTicket {
            generation: state.generation,
            signal: controller.signal(),
        };
        state.controller = Some(controller);
        ticket
    }

    /// True while `ticket` belongs to the most recent fetch and was not aborted.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        let state = self.lock();
        !state.closed && state.generation == ticket.generation && !ticket.signal.is_aborted()
    }

    /// Aborts the in-flight fetch and refuses new ones.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        if let Some(controller) = state.controller.take() {
            controller.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
