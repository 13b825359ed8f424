//! Caller-supplied lifecycle callbacks and the scroll side effect.

use std::fmt;

type UrlHook = Box<dyn FnMut(&str)>;

/// Optional notifications fired by the transition controller.
///
/// Each hook receives the URL of the navigation it reports on.
#[derive(Default)]
pub struct Lifecycle {
    on_route_change: Option<UrlHook>,
    on_load_start: Option<UrlHook>,
    on_load_end: Option<UrlHook>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired after a route-changing commit becomes visible.
    pub fn on_route_change(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_route_change = Some(Box::new(hook));
        self
    }

    /// Fired once per generation when the incoming route suspends.
    pub fn on_load_start(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_load_start = Some(Box::new(hook));
        self
    }

    /// Fired when a load started for the live generation commits.
    pub fn on_load_end(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.on_load_end = Some(Box::new(hook));
        self
    }

    pub(crate) fn route_changed(&mut self, url: &str) {
        if let Some(hook) = self.on_route_change.as_mut() {
            hook(url);
        }
    }

    pub(crate) fn load_started(&mut self, url: &str) {
        if let Some(hook) = self.on_load_start.as_mut() {
            hook(url);
        }
    }

    pub(crate) fn load_ended(&mut self, url: &str) {
        if let Some(hook) = self.on_load_end.as_mut() {
            hook(url);
        }
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("on_route_change", &self.on_route_change.is_some())
            .field("on_load_start", &self.on_load_start.is_some())
            .field("on_load_end", &self.on_load_end.is_some())
            .finish()
    }
}

/// Document viewport the controller resets on push navigations.
pub trait Viewport {
    fn scroll_to_top(&mut self);
}
