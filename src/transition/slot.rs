//! `current` / `previous` render slots.
//!
//! # Responsibilities
//! - Hold at most one current and one previous subtree
//! - Decide which committed output is visible
//!
//! # Design Decisions
//! - `previous` only exists while a route transition is suspended
//! - The first suspension wins: a held previous is never replaced
//! - A subtree is "ready" once its own render committed; a waiting subtree
//!   may still carry the output of the update it replaced

use crate::render::Subtree;

/// A subtree placed in a slot, with the output it last committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Mounted<C, O> {
    pub subtree: Subtree<C>,
    pub output: Option<O>,
    ready: bool,
}

impl<C, O> Mounted<C, O> {
    /// A subtree whose render committed `output`.
    pub fn ready(subtree: Subtree<C>, output: O) -> Self {
        Self {
            subtree,
            output: Some(output),
            ready: true,
        }
    }

    /// A subtree still waiting on an async dependency.
    pub fn waiting(subtree: Subtree<C>, output: Option<O>) -> Self {
        Self {
            subtree,
            output,
            ready: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn component(&self) -> &C {
        &self.subtree.component
    }
}

/// The two ownership slots of a transition controller.
#[derive(Debug)]
pub struct RenderSlots<C, O> {
    current: Option<Mounted<C, O>>,
    previous: Option<Mounted<C, O>>,
}

impl<C, O> Default for RenderSlots<C, O> {
    fn default() -> Self {
        Self {
            current: None,
            previous: None,
        }
    }
}

impl<C, O> RenderSlots<C, O> {
    pub fn current(&self) -> Option<&Mounted<C, O>> {
        self.current.as_ref()
    }

    pub fn previous(&self) -> Option<&Mounted<C, O>> {
        self.previous.as_ref()
    }

    /// Make `mounted` current and drop any held previous, returning it.
    pub fn commit(&mut self, mounted: Mounted<C, O>) -> Option<Mounted<C, O>> {
        self.current = Some(mounted);
        self.previous.take()
    }

    /// Keep `candidate` visible while the incoming subtree waits.
    /// Returns false if a previous subtree is already held.
    pub fn hold_previous(&mut self, candidate: Mounted<C, O>) -> bool {
        if self.previous.is_some() {
            return false;
        }
        self.previous = Some(candidate);
        true
    }

    /// Point `current` at a waiting subtree. With `keep_output` the old
    /// current's output stays on screen (same-route updates).
    pub fn repoint(&mut self, subtree: Subtree<C>, keep_output: bool) {
        let output = if keep_output {
            self.current.take().and_then(|m| m.output)
        } else {
            None
        };
        self.current = Some(Mounted::waiting(subtree, output));
    }

    /// Output on screen: the held previous if any, else the current one.
    pub fn visible(&self) -> Option<&O> {
        self.previous
            .as_ref()
            .and_then(|m| m.output.as_ref())
            .or_else(|| self.current.as_ref().and_then(|m| m.output.as_ref()))
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RouteProps;

    fn subtree(name: &'static str) -> Subtree<&'static str> {
        Subtree::new(name, RouteProps::default())
    }

    #[test]
    fn test_first_suspension_wins() {
        let mut slots: RenderSlots<&str, String> = RenderSlots::default();
        slots.commit(Mounted::ready(subtree("a"), "A".to_string()));

        let a = slots.current().cloned().unwrap();
        assert!(slots.hold_previous(a));
        slots.repoint(subtree("b"), false);
        assert_eq!(slots.visible().map(String::as_str), Some("A"));

        let b = slots.current().cloned().unwrap();
        assert!(!slots.hold_previous(b));
        slots.repoint(subtree("c"), false);

        assert_eq!(slots.previous().map(|m| *m.component()), Some("a"));
        assert_eq!(slots.current().map(|m| *m.component()), Some("c"));
        assert_eq!(slots.visible().map(String::as_str), Some("A"));
    }

    #[test]
    fn test_commit_releases_previous() {
        let mut slots: RenderSlots<&str, String> = RenderSlots::default();
        slots.commit(Mounted::ready(subtree("a"), "A".to_string()));
        let a = slots.current().cloned().unwrap();
        slots.hold_previous(a);
        slots.repoint(subtree("b"), false);

        let released = slots.commit(Mounted::ready(subtree("b"), "B".to_string()));
        assert_eq!(released.map(|m| *m.component()), Some("a"));
        assert!(slots.previous().is_none());
        assert_eq!(slots.visible().map(String::as_str), Some("B"));
    }

    #[test]
    fn test_repoint_keeps_output_for_same_route() {
        let mut slots: RenderSlots<&str, String> = RenderSlots::default();
        slots.commit(Mounted::ready(subtree("a"), "A1".to_string()));
        slots.repoint(subtree("a"), true);

        let current = slots.current().unwrap();
        assert!(!current.is_ready());
        assert_eq!(current.output.as_deref(), Some("A1"));
    }
}
