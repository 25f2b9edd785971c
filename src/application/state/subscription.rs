//! Observable state cells and their subscriptions.
//!
//! A [`StateCell`] holds the state a controller publishes. Observers obtain a
//! [`Subscription`] and either read the latest value or await the next change.
//! Once the cell is closed, updates are dropped; dropping the cell ends every
//! subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Shared, observable state owned by a controller.
pub struct StateCell<S> {
    tx: watch::Sender<S>,
    closed: AtomicBool,
}

impl<S> StateCell<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            closed: AtomicBool::new(false),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Mutates the state in place and notifies subscribers.
    ///
    /// Returns false, leaving the state untouched, once the cell is closed.
    pub fn update<F>(&self, mutate: F) -> bool
    where
        F: FnOnce(&mut S),
    {
        if self.is_closed() {
            return false;
        }
        self.tx.send_modify(mutate);
        true
    }

    pub fn subscribe(&self) -> Subscription<S> {
        Subscription {
            rx: Some(self.tx.subscribe()),
        }
    }

    /// Stops accepting updates. Idempotent.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Observer handle over a [`StateCell`].
pub struct Subscription<S> {
    rx: Option<watch::Receiver<S>>,
}

impl<S: Clone> Subscription<S> {
    /// Latest published state, or `None` after `dispose()`.
    pub fn current(&self) -> Option<S> {
        self.rx.as_ref().map(|rx| rx.borrow().clone())
    }

    /// Waits for the next state change.
    ///
    /// Returns `None` if the subscription was disposed or the cell is gone.
    pub async fn changed(&mut self) -> Option<S> {
        let rx = self.rx.as_mut()?;
        rx.changed().await.ok()?;
        Some(rx.borrow_and_update().clone())
    }

    /// Detaches from the cell. Further calls return `None`.
    pub fn dispose(&mut self) {
        self.rx = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.rx.is_none()
    }
}
