//! Location state and navigation requests.
//!
//! # Responsibilities
//! - Hold the current `Location`
//! - Apply navigation requests to the history (push or replace)
//! - Publish every change together with how it happened
//! - Decide whether an activated link is intercepted or left to the browser
//!
//! # Design Decisions
//! - Push/replace travels on the request and the published change, never in
//!   shared mutable state
//! - Scope is per instance, passed at construction
//! - Changes are published on a `watch` channel: late subscribers see the
//!   latest location, intermediate ones may be coalesced

use tokio::sync::watch;

use crate::location::scope::Scope;
use crate::location::snapshot::Location;
use crate::observability::metrics;

/// Browser-history collaborator.
pub trait History {
    /// URL of the active entry.
    fn current(&self) -> String;
    /// Add a new entry and make it active.
    fn push(&mut self, url: &str);
    /// Overwrite the active entry.
    fn replace(&mut self, url: &str);
}

/// In-memory history for hosts without a browser (and for tests).
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// Move one entry back. Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move one entry forward. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: &str) {
        // A push discards any forward entries
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, url: &str) {
        self.entries[self.index] = url.to_string();
    }
}

/// How a location change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKind {
    /// The location the state was created with.
    Initial,
    /// A new history entry.
    Push,
    /// The active entry was overwritten.
    Replace,
    /// Back/forward traversal.
    Pop,
}

impl NavigationKind {
    pub fn is_push(self) -> bool {
        matches!(self, NavigationKind::Push)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NavigationKind::Initial => "initial",
            NavigationKind::Push => "push",
            NavigationKind::Replace => "replace",
            NavigationKind::Pop => "pop",
        }
    }
}

/// A request to move to `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    pub replace: bool,
}

impl NavigationRequest {
    pub fn push(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            replace: false,
        }
    }

    pub fn replace(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            replace: true,
        }
    }
}

/// A published location change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    pub location: Location,
    pub kind: NavigationKind,
}

impl LocationChange {
    pub fn new(url: &str, kind: NavigationKind) -> Self {
        Self {
            location: Location::parse(url),
            kind,
        }
    }
}

/// An activated anchor, reduced to what interception needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkActivation {
    /// The href, relative to the page origin.
    pub href: String,
    /// The anchor's `target` attribute, if any.
    pub target: Option<String>,
    /// False when the link points at another origin.
    pub same_origin: bool,
    /// Mouse button (0 = primary).
    pub button: u16,
    /// Ctrl, meta, alt or shift was held.
    pub modifier_key: bool,
}

impl LinkActivation {
    /// A plain primary-button click on a same-origin link.
    pub fn click(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: None,
            same_origin: true,
            button: 0,
            modifier_key: false,
        }
    }

    fn targets_self(&self) -> bool {
        match self.target.as_deref() {
            None => true,
            Some(t) => {
                t.is_empty() || t.eq_ignore_ascii_case("_self") || t.eq_ignore_ascii_case("self")
            }
        }
    }
}

/// What happened to an activated link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Handled in-app as a push navigation.
    Intercepted(Location),
    /// Left to native navigation.
    Native,
}

/// Owns the current location and publishes changes.
pub struct LocationState<H: History = MemoryHistory> {
    history: H,
    scope: Option<Scope>,
    tx: watch::Sender<LocationChange>,
}

impl<H: History> LocationState<H> {
    pub fn new(history: H, scope: Option<Scope>) -> Self {
        let initial = LocationChange::new(&history.current(), NavigationKind::Initial);
        let (tx, _) = watch::channel(initial);
        Self { history, scope, tx }
    }

    /// Snapshot of the current location.
    pub fn location(&self) -> Location {
        self.tx.borrow().location.clone()
    }

    /// The most recent change.
    pub fn last_change(&self) -> LocationChange {
        self.tx.borrow().clone()
    }

    /// Subscribe to location changes.
    pub fn subscribe(&self) -> watch::Receiver<LocationChange> {
        self.tx.subscribe()
    }

    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable access for traversal (back/forward). Call `pop_state` after
    /// moving so subscribers see the new entry.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Apply a navigation request and publish the result.
    pub fn navigate(&mut self, request: NavigationRequest) -> Location {
        let kind = if request.replace {
            self.history.replace(&request.url);
            NavigationKind::Replace
        } else {
            self.history.push(&request.url);
            NavigationKind::Push
        };
        self.publish(&request.url, kind)
    }

    /// Push navigation to `url`.
    pub fn route(&mut self, url: &str) -> Location {
        self.navigate(NavigationRequest::push(url))
    }

    /// Publish the history's active entry after a back/forward traversal.
    pub fn pop_state(&mut self) -> Location {
        let url = self.history.current();
        self.publish(&url, NavigationKind::Pop)
    }

    /// Decide whether a link activation is handled in-app.
    pub fn activate_link(&mut self, link: &LinkActivation) -> LinkOutcome {
        if link.modifier_key || link.button != 0 {
            return LinkOutcome::Native;
        }
        if !link.same_origin || link.href.starts_with('#') || !link.targets_self() {
            return LinkOutcome::Native;
        }
        if let Some(scope) = &self.scope {
            if !scope.allows(&link.href) {
                tracing::debug!(
                    href = %link.href,
                    "Link outside scope, deferring to native navigation"
                );
                return LinkOutcome::Native;
            }
        }
        LinkOutcome::Intercepted(self.route(&link.href))
    }

    fn publish(&mut self, url: &str, kind: NavigationKind) -> Location {
        let change = LocationChange::new(url, kind);
        tracing::debug!(url = %url, kind = kind.as_str(), "Location changed");
        metrics::record_navigation(kind);
        let location = change.location.clone();
        self.tx.send_replace(change);
        location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> LocationState {
        LocationState::new(MemoryHistory::new("/"), Some(Scope::Prefix("/app".into())))
    }

    #[test]
    fn test_push_and_replace() {
        let mut state = LocationState::new(MemoryHistory::new("/"), None);
        state.route("/a");
        assert_eq!(state.last_change().kind, NavigationKind::Push);
        assert_eq!(state.history().len(), 2);

        state.navigate(NavigationRequest::replace("/b?x=1"));
        let change = state.last_change();
        assert_eq!(change.kind, NavigationKind::Replace);
        assert_eq!(change.location.path(), "/b");
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_pop_state() {
        let mut state = LocationState::new(MemoryHistory::new("/"), None);
        state.route("/a");
        state.route("/b");
        assert!(state.history_mut().back());
        let location = state.pop_state();
        assert_eq!(location.path(), "/a");
        assert_eq!(state.last_change().kind, NavigationKind::Pop);

        // Push after going back drops the forward entry
        state.route("/c");
        assert!(!state.history_mut().forward());
    }

    #[test]
    fn test_subscriber_sees_changes() {
        let mut state = LocationState::new(MemoryHistory::new("/start"), None);
        let mut rx = state.subscribe();
        assert_eq!(rx.borrow_and_update().kind, NavigationKind::Initial);

        state.route("/next");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().location.path(), "/next");
    }

    #[test]
    fn test_link_interception() {
        let mut state = state();
        let outcome = state.activate_link(&LinkActivation::click("/app/settings"));
        assert!(matches!(outcome, LinkOutcome::Intercepted(ref l) if l.path() == "/app/settings"));
        assert_eq!(state.last_change().kind, NavigationKind::Push);
    }

    #[test]
    fn test_links_left_to_native_navigation() {
        let mut state = state();
        let native = [
            LinkActivation::click("/blog"),
            LinkActivation::click("#section"),
            LinkActivation { modifier_key: true, ..LinkActivation::click("/app/x") },
            LinkActivation { button: 1, ..LinkActivation::click("/app/x") },
            LinkActivation { same_origin: false, ..LinkActivation::click("/app/x") },
            LinkActivation { target: Some("_blank".into()), ..LinkActivation::click("/app/x") },
        ];
        for link in native {
            assert_eq!(state.activate_link(&link), LinkOutcome::Native, "{link:?}");
        }
        assert_eq!(state.location().path(), "/");

        let self_target = LinkActivation {
            target: Some("_SELF".into()),
            ..LinkActivation::click("/app/y")
        };
        assert!(matches!(state.activate_link(&self_target), LinkOutcome::Intercepted(_)));
    }
}
