//! Route transition state machine.
//!
//! # Responsibilities
//! - Select the route for each location change
//! - Detect route changes and advance the generation
//! - Keep the outgoing subtree visible while the incoming one suspends
//! - Fire lifecycle callbacks exactly once per meaningful transition
//! - Discard continuations captured by a superseded generation
//!
//! # Design Decisions
//! - All state lives in controller-owned fields; `TransitionState` is derived
//! - Continuations are futures yielding the generation they captured; a
//!   stale one is dropped, never cancelled
//! - Render failures are returned, not retried and not turned into suspensions

use std::fmt;
use std::time::Instant;

use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::config::TransitionConfig;
use crate::location::{Location, LocationChange};
use crate::observability::metrics;
use crate::render::{RenderEngine, RenderError, RenderStatus, RouteProps, Subtree, Suspension};
use crate::routing::{Params, RouteTable};
use crate::transition::generation::{Generation, GenerationCounter};
use crate::transition::lifecycle::{Lifecycle, Viewport};
use crate::transition::slot::{Mounted, RenderSlots};

/// What a navigation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The incoming subtree rendered and is visible.
    Committed {
        generation: Generation,
        route_changed: bool,
    },
    /// The incoming subtree is waiting; the previous output stays visible.
    Suspended { generation: Generation },
    /// No route matched and no default route exists; nothing is mounted.
    Unmatched { generation: Generation },
}

/// What a resolved continuation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The waiting subtree committed.
    Committed(Generation),
    /// The waiting subtree suspended again on another dependency.
    Resuspended(Generation),
    /// Nothing changed (stale generation, or already settled).
    Discarded(Generation),
}

/// Derived transition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Stable,
    Suspended,
    Settling,
}

/// Context a committed route exposes to a nested controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    /// Unconsumed path; empty when the route captured no rest.
    pub rest: String,
    pub params: Params,
}

impl RouteContext {
    pub fn from_props(props: &RouteProps) -> Self {
        Self {
            rest: props.rest.clone().unwrap_or_default(),
            params: props.params.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LoadStarted {
    generation: Generation,
    started: Instant,
}

#[derive(Debug, Clone)]
struct PendingRouteChange {
    /// Reset scroll on commit: a push that replaced an outgoing route.
    scroll: bool,
}

/// Decides what to mount on every location change.
pub struct TransitionController<C, E: RenderEngine<C>> {
    routes: RouteTable<C>,
    engine: E,
    lifecycle: Lifecycle,
    viewport: Option<Box<dyn Viewport>>,
    config: TransitionConfig,
    generation: GenerationCounter,
    slots: RenderSlots<C, E::Output>,
    loading: Option<LoadStarted>,
    route_change: Option<PendingRouteChange>,
    settling: Option<Generation>,
    has_committed: bool,
    placeholder: Option<E::Output>,
    continuations: FuturesUnordered<LocalBoxFuture<'static, Generation>>,
}

impl<C, E> TransitionController<C, E>
where
    C: Clone + PartialEq + fmt::Debug,
    E: RenderEngine<C>,
{
    pub fn new(routes: RouteTable<C>, engine: E) -> Self {
        Self {
            routes,
            engine,
            lifecycle: Lifecycle::default(),
            viewport: None,
            config: TransitionConfig::default(),
            generation: GenerationCounter::new(),
            slots: RenderSlots::default(),
            loading: None,
            route_change: None,
            settling: None,
            has_committed: false,
            placeholder: None,
            continuations: FuturesUnordered::new(),
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Some(Box::new(viewport));
        self
    }

    pub fn with_config(mut self, config: TransitionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn routes(&self) -> &RouteTable<C> {
        &self.routes
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn generation(&self) -> Generation {
        self.generation.current()
    }

    pub fn current(&self) -> Option<&Mounted<C, E::Output>> {
        self.slots.current()
    }

    pub fn previous(&self) -> Option<&Mounted<C, E::Output>> {
        self.slots.previous()
    }

    /// Output currently on screen.
    pub fn visible(&self) -> Option<&E::Output> {
        self.slots.visible().or(self.placeholder.as_ref())
    }

    pub fn state(&self) -> TransitionState {
        if self.settling.is_some() {
            TransitionState::Settling
        } else if self.slots.current().is_some_and(|m| !m.is_ready()) {
            TransitionState::Suspended
        } else {
            TransitionState::Stable
        }
    }

    /// Number of continuations not yet resolved.
    pub fn pending(&self) -> usize {
        self.continuations.len()
    }

    /// True when no continuation is outstanding or mid-settle.
    pub fn is_idle(&self) -> bool {
        self.continuations.is_empty() && self.settling.is_none()
    }

    /// `rest`/`params` for a nested controller.
    pub fn route_context(&self) -> Option<RouteContext> {
        self.slots
            .current()
            .map(|m| RouteContext::from_props(&m.subtree.props))
    }

    /// React to a location change, matching against its path.
    pub fn navigate(&mut self, change: &LocationChange) -> Result<Transition, RenderError> {
        let path = change.location.path().to_string();
        self.apply(change, &path, &Params::new())
    }

    /// React to a location change inside an enclosing route, matching
    /// against the enclosing `rest`.
    pub fn navigate_nested(
        &mut self,
        change: &LocationChange,
        context: &RouteContext,
    ) -> Result<Transition, RenderError> {
        self.apply(change, &context.rest, &context.params)
    }

    /// Wait for the next continuation and apply it.
    ///
    /// Returns `None` when nothing is outstanding. Cancel-safe: a settle
    /// interrupted after its continuation resolved finishes on the next call.
    pub async fn settle_next(&mut self) -> Option<Result<Settlement, RenderError>> {
        let generation = match self.settling {
            Some(generation) => generation,
            None => {
                let generation = self.continuations.next().await?;
                if let Some(done) = self.begin_settle(generation) {
                    return Some(Ok(done));
                }
                // Commit on the next scheduling opportunity.
                tokio::task::yield_now().await;
                generation
            }
        };
        Some(self.finish_settle(generation))
    }

    /// Drive continuations until none is outstanding.
    pub async fn settle_all(&mut self) -> Result<Vec<Settlement>, RenderError> {
        let mut settled = Vec::new();
        while let Some(result) = self.settle_next().await {
            settled.push(result?);
        }
        Ok(settled)
    }

    fn apply(
        &mut self,
        change: &LocationChange,
        path: &str,
        outer: &Params,
    ) -> Result<Transition, RenderError> {
        self.settling = None;
        let location = &change.location;

        let selected = self
            .routes
            .select(path)
            .map(|m| (m.route.component().clone(), m.fallback, m.result));
        let Some((component, fallback, matched)) = selected else {
            return Ok(self.unmatch(location));
        };
        let props = RouteProps::new(location, path, outer, matched);
        let incoming = Subtree::new(component, props);

        let outgoing = self.slots.current().map(|m| m.component().clone());
        let route_changed = outgoing.as_ref() != Some(&incoming.component);

        let candidate_previous = if route_changed {
            let generation = self.generation.advance();
            self.route_change = Some(PendingRouteChange {
                scroll: outgoing.is_some() && change.kind.is_push(),
            });
            tracing::debug!(
                generation = %generation,
                url = %location.url(),
                from = ?outgoing,
                to = ?incoming.component,
                fallback,
                "Route change"
            );
            self.slots.current().cloned()
        } else {
            tracing::debug!(
                generation = %self.generation.current(),
                url = %location.url(),
                component = ?incoming.component,
                "Same-route update"
            );
            None
        };

        let generation = self.generation.current();
        let status = match self.engine.render(&incoming) {
            Ok(status) => status,
            Err(error) => {
                tracing::warn!(
                    generation = %generation,
                    url = %location.url(),
                    error = %error,
                    "Render failed"
                );
                if route_changed {
                    self.route_change = None;
                }
                return Err(error);
            }
        };

        match status {
            RenderStatus::Ready(output) => {
                self.commit(incoming, output);
                Ok(Transition::Committed {
                    generation,
                    route_changed,
                })
            }
            RenderStatus::Suspended(suspension) => {
                self.suspend(incoming, suspension, candidate_previous, route_changed);
                Ok(Transition::Suspended { generation })
            }
        }
    }

    fn unmatch(&mut self, location: &Location) -> Transition {
        tracing::warn!(url = %location.url(), "No route matched and no default route declared");
        if self.slots.current().is_some() {
            self.generation.advance();
        }
        self.slots.clear();
        self.route_change = None;
        self.loading = None;
        Transition::Unmatched {
            generation: self.generation.current(),
        }
    }

    fn commit(&mut self, subtree: Subtree<C>, output: E::Output) {
        let generation = self.generation.current();
        let url = subtree.props.url.clone();

        if let Some(released) = self.slots.commit(Mounted::ready(subtree, output.clone())) {
            tracing::debug!(
                generation = %generation,
                component = ?released.component(),
                "Released previous subtree"
            );
        }
        self.settling = None;

        if !self.has_committed {
            self.has_committed = true;
            if let Some(placeholder) = self.placeholder.take() {
                if placeholder != output {
                    tracing::debug!("Discarding placeholder output after first commit");
                    self.engine.discard(placeholder);
                }
            }
        }

        if let Some(change) = self.route_change.take() {
            tracing::info!(generation = %generation, url = %url, "Route changed");
            metrics::record_route_change();
            self.lifecycle.route_changed(&url);
            if change.scroll && self.config.scroll_to_top_on_push {
                if let Some(viewport) = self.viewport.as_mut() {
                    viewport.scroll_to_top();
                }
            }
        }

        if let Some(load) = self.loading.take() {
            if load.generation == generation {
                metrics::record_load_duration(load.started.elapsed());
                tracing::debug!(generation = %generation, url = %url, "Load finished");
                self.lifecycle.load_ended(&url);
            }
        }
    }

    fn suspend(
        &mut self,
        subtree: Subtree<C>,
        suspension: Suspension<E::Output>,
        candidate_previous: Option<Mounted<C, E::Output>>,
        route_changed: bool,
    ) {
        let generation = self.generation.current();
        let url = subtree.props.url.clone();
        let Suspension { pending, partial } = suspension;

        if let Some(previous) = candidate_previous {
            if self.slots.hold_previous(previous) {
                tracing::debug!(
                    generation = %generation,
                    "Holding previous subtree while suspended"
                );
            }
        }
        self.slots.repoint(subtree, !route_changed);

        if let Some(partial) = partial {
            self.keep_placeholder(partial);
        }

        if route_changed {
            self.loading = Some(LoadStarted {
                generation,
                started: Instant::now(),
            });
            metrics::record_suspension();
            tracing::debug!(generation = %generation, url = %url, "Load started");
            self.lifecycle.load_started(&url);
        }

        self.continuations.push(
            async move {
                pending.await;
                generation
            }
            .boxed_local(),
        );
    }

    /// Only the first placeholder seen before any commit is kept; it is
    /// removed on the first commit. Any other partial output is discarded.
    fn keep_placeholder(&mut self, partial: E::Output) {
        if self.placeholder.as_ref() == Some(&partial) {
            return;
        }
        if !self.has_committed && self.placeholder.is_none() {
            self.placeholder = Some(partial);
        } else {
            self.engine.discard(partial);
        }
    }

    fn begin_settle(&mut self, generation: Generation) -> Option<Settlement> {
        if !self.generation.is_current(generation) {
            tracing::debug!(
                generation = %generation,
                current = %self.generation.current(),
                "Discarding stale completion"
            );
            metrics::record_stale_completion();
            return Some(Settlement::Discarded(generation));
        }
        if !self.slots.current().is_some_and(|m| !m.is_ready()) {
            tracing::debug!(generation = %generation, "Completion arrived after settle");
            return Some(Settlement::Discarded(generation));
        }

        // `previous` stays on screen until the re-render actually commits.
        self.settling = Some(generation);
        tracing::debug!(generation = %generation, "Settling");
        None
    }

    fn finish_settle(&mut self, generation: Generation) -> Result<Settlement, RenderError> {
        self.settling = None;
        let Some(subtree) = self.slots.current().map(|m| m.subtree.clone()) else {
            return Ok(Settlement::Discarded(generation));
        };

        match self.engine.render(&subtree) {
            Ok(RenderStatus::Ready(output)) => {
                self.commit(subtree, output);
                Ok(Settlement::Committed(generation))
            }
            Ok(RenderStatus::Suspended(suspension)) => {
                self.suspend(subtree, suspension, None, false);
                Ok(Settlement::Resuspended(generation))
            }
            Err(error) => {
                tracing::warn!(
                    generation = %generation,
                    error = %error,
                    "Render failed while settling"
                );
                Err(error)
            }
        }
    }
}

impl<C: fmt::Debug, E: RenderEngine<C>> fmt::Debug for TransitionController<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionController")
            .field("generation", &self.generation.current())
            .field("slots", &self.slots)
            .field("pending", &self.continuations.len())
            .field("has_committed", &self.has_committed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::NavigationKind;
    use crate::render::Pending;
    use crate::routing::RoutePattern;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    /// Renders `"<component>:<path>"`; a gated component suspends once.
    #[derive(Default)]
    struct GatedEngine {
        gates: HashMap<&'static str, oneshot::Receiver<()>>,
    }

    impl GatedEngine {
        fn gate(&mut self, component: &'static str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.insert(component, rx);
            tx
        }
    }

    impl RenderEngine<&'static str> for GatedEngine {
        type Output = String;

        fn render(
            &mut self,
            subtree: &Subtree<&'static str>,
        ) -> Result<RenderStatus<String>, RenderError> {
            if let Some(rx) = self.gates.remove(subtree.component) {
                return Ok(RenderStatus::Suspended(Suspension::new(Pending::new(
                    async move {
                        let _ = rx.await;
                    },
                ))));
            }
            Ok(RenderStatus::Ready(format!(
                "{}:{}",
                subtree.component, subtree.props.path
            )))
        }
    }

    fn table() -> RouteTable<&'static str> {
        RouteTable::default()
            .route(RoutePattern::new("/a", "a"))
            .route(RoutePattern::new("/b", "b"))
            .route(RoutePattern::new("/profile/:id", "profile"))
    }

    fn push(url: &str) -> LocationChange {
        LocationChange::new(url, NavigationKind::Push)
    }

    #[test]
    fn test_sync_navigation_commits() {
        let mut controller = TransitionController::new(table(), GatedEngine::default());
        let t = controller.navigate(&push("/a")).unwrap();
        assert!(matches!(t, Transition::Committed { route_changed: true, .. }));
        assert_eq!(controller.visible().map(String::as_str), Some("a:/a"));
        assert_eq!(controller.state(), TransitionState::Stable);
        assert_eq!(controller.generation().as_u64(), 1);
    }

    #[test]
    fn test_same_route_update_keeps_generation() {
        let mut controller = TransitionController::new(table(), GatedEngine::default());
        controller.navigate(&push("/profile/1")).unwrap();
        let t = controller.navigate(&push("/profile/2")).unwrap();
        assert!(matches!(t, Transition::Committed { route_changed: false, .. }));
        assert_eq!(controller.generation().as_u64(), 1);
        assert_eq!(controller.visible().map(String::as_str), Some("profile:/profile/2"));
    }

    #[test]
    fn test_unmatched_clears_slots() {
        let mut controller = TransitionController::new(table(), GatedEngine::default());
        controller.navigate(&push("/a")).unwrap();
        let t = controller.navigate(&push("/nowhere")).unwrap();
        assert!(matches!(t, Transition::Unmatched { .. }));
        assert!(controller.visible().is_none());
        assert_eq!(controller.generation().as_u64(), 2);
    }

    #[tokio::test]
    async fn test_suspend_then_settle() {
        let mut engine = GatedEngine::default();
        let gate = engine.gate("b");
        let mut controller = TransitionController::new(table(), engine);

        controller.navigate(&push("/a")).unwrap();
        let t = controller.navigate(&push("/b")).unwrap();
        assert!(matches!(t, Transition::Suspended { .. }));
        assert_eq!(controller.state(), TransitionState::Suspended);
        assert_eq!(controller.visible().map(String::as_str), Some("a:/a"));
        assert_eq!(controller.previous().map(|m| *m.component()), Some("a"));

        gate.send(()).unwrap();
        let settled = controller.settle_next().await.unwrap().unwrap();
        assert_eq!(settled, Settlement::Committed(controller.generation()));
        assert!(controller.previous().is_none());
        assert_eq!(controller.visible().map(String::as_str), Some("b:/b"));
        assert!(controller.is_idle());
    }

    #[tokio::test]
    async fn test_superseded_completion_is_discarded() {
        let mut engine = GatedEngine::default();
        let gate = engine.gate("b");
        let mut controller = TransitionController::new(table(), engine);

        controller.navigate(&push("/a")).unwrap();
        controller.navigate(&push("/b")).unwrap();
        let stale = controller.generation();
        controller.navigate(&push("/profile/9")).unwrap();

        gate.send(()).unwrap();
        let settled = controller.settle_next().await.unwrap().unwrap();
        assert_eq!(settled, Settlement::Discarded(stale));
        assert_eq!(controller.visible().map(String::as_str), Some("profile:/profile/9"));
    }

    #[test]
    fn test_route_context_defaults_rest() {
        let mut controller = TransitionController::new(table(), GatedEngine::default());
        assert!(controller.route_context().is_none());
        controller.navigate(&push("/profile/3")).unwrap();
        let ctx = controller.route_context().unwrap();
        assert_eq!(ctx.rest, "");
        assert_eq!(ctx.params.get("id"), Some(&Some("3".to_string())));
    }
}
