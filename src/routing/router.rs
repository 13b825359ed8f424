//! Route lookup.
//!
//! # Responsibilities
//! - Store declared routes in declaration order
//! - Resolve a path to the first matching route
//! - Fall back to the first default route when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan in declaration order (first match wins)
//! - Default routes are only consulted after every other route failed
//! - Explicit `None` when there is neither a match nor a default

use crate::config::RouteConfig;
use crate::routing::matcher::MatchResult;
use crate::routing::segment::Pattern;

/// A declared route: pattern, default flag and an opaque component payload.
#[derive(Debug, Clone)]
pub struct RoutePattern<C> {
    pattern: Pattern,
    is_default: bool,
    component: C,
}

impl<C> RoutePattern<C> {
    pub fn new(pattern: &str, component: C) -> Self {
        Self {
            pattern: Pattern::parse(pattern),
            is_default: false,
            component,
        }
    }

    /// A fallback route, used only when no other route matches.
    pub fn fallback(component: C) -> Self {
        Self {
            pattern: Pattern::parse(""),
            is_default: true,
            component,
        }
    }

    /// Mark (or unmark) this route as the default.
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn component(&self) -> &C {
        &self.component
    }
}

/// The selected route together with its match result.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, C> {
    /// The route that matched.
    pub route: &'a RoutePattern<C>,
    pub result: MatchResult,
    /// True if `route` was chosen as the default fallback.
    pub fallback: bool,
}

/// Ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable<C> {
    routes: Vec<RoutePattern<C>>,
}

impl<C> Default for RouteTable<C> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<C> RouteTable<C> {
    pub fn new(routes: Vec<RoutePattern<C>>) -> Self {
        Self { routes }
    }

    /// Append a route (builder style).
    pub fn route(mut self, route: RoutePattern<C>) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[RoutePattern<C>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve `path` to a route.
    pub fn select(&self, path: &str) -> Option<RouteMatch<'_, C>> {
        let matched = self
            .routes
            .iter()
            .filter(|r| !r.is_default)
            .find_map(|route| {
                route.pattern.match_path(path).map(|result| RouteMatch {
                    route,
                    result,
                    fallback: false,
                })
            });

        if matched.is_some() {
            return matched;
        }

        let fallback = self.routes.iter().find(|r| r.is_default);
        match fallback {
            Some(route) => {
                tracing::debug!(path = %path, "No route matched, using default route");
                Some(RouteMatch {
                    route,
                    result: MatchResult::default(),
                    fallback: true,
                })
            }
            None => {
                tracing::debug!(path = %path, "No route matched and no default declared");
                None
            }
        }
    }
}

impl RouteTable<String> {
    /// Build a table from configuration; the payload is the component name.
    pub fn from_config(configs: &[RouteConfig]) -> Self {
        let routes = configs
            .iter()
            .map(|c| RoutePattern::new(&c.path, c.component.clone()).with_default(c.default))
            .collect();
        Self { routes }
    }
}
