//! Event loop tying location changes to a transition controller.

use std::future::Future;

use tokio::sync::watch;

use crate::location::LocationChange;
use crate::render::{ErrorBoundary, RenderEngine};
use crate::transition::controller::TransitionController;

/// Runs a controller against a stream of location changes on one task.
pub struct TransitionDriver<C, E: RenderEngine<C>> {
    controller: TransitionController<C, E>,
    changes: watch::Receiver<LocationChange>,
    boundary: ErrorBoundary,
}

impl<C, E> TransitionDriver<C, E>
where
    C: Clone + PartialEq + std::fmt::Debug,
    E: RenderEngine<C>,
{
    pub fn new(
        controller: TransitionController<C, E>,
        changes: watch::Receiver<LocationChange>,
    ) -> Self {
        Self {
            controller,
            changes,
            boundary: ErrorBoundary::new(),
        }
    }

    /// Route render failures to `boundary` instead of the default one.
    pub fn with_boundary(mut self, boundary: ErrorBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn controller(&self) -> &TransitionController<C, E> {
        &self.controller
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    pub fn into_parts(self) -> (TransitionController<C, E>, ErrorBoundary) {
        (self.controller, self.boundary)
    }

    /// Dispatch the current location, then every change and resolved
    /// continuation until `shutdown` completes, or until the location
    /// channel closes and nothing is left to settle.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> Self {
        tokio::pin!(shutdown);

        let initial = self.changes.borrow_and_update().clone();
        self.dispatch(&initial);

        let mut location_open = true;
        loop {
            if !location_open && self.controller.is_idle() {
                tracing::info!("Location channel closed and transitions settled, exiting loop");
                break;
            }

            tokio::select! {
                changed = self.changes.changed(), if location_open => {
                    match changed {
                        Ok(()) => {
                            let change = self.changes.borrow_and_update().clone();
                            self.dispatch(&change);
                        }
                        Err(_) => {
                            tracing::debug!("Location channel closed");
                            location_open = false;
                        }
                    }
                }
                Some(settled) = self.controller.settle_next() => {
                    if let Some(settlement) = self.boundary.capture(settled) {
                        tracing::debug!(?settlement, "Continuation applied");
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Transition driver received shutdown signal, exiting loop");
                    break;
                }
            }
        }
        self
    }

    fn dispatch(&mut self, change: &LocationChange) {
        let result = self.controller.navigate(change);
        if let Some(transition) = self.boundary.capture(result) {
            tracing::debug!(
                url = %change.location.url(),
                kind = change.kind.as_str(),
                ?transition,
                "Location dispatched"
            );
        }
    }
}
