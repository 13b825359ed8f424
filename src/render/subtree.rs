//! Subtree descriptors handed to the rendering engine.

use std::collections::HashMap;

use serde::Serialize;

use crate::location::Location;
use crate::routing::{MatchResult, Params};

/// Props a matched route's component is rendered with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteProps {
    /// Full URL of the navigation.
    pub url: String,
    /// The path that was matched (location path, or the enclosing `rest`).
    pub path: String,
    pub query: HashMap<String, String>,
    /// Enclosing params overlaid with this route's own.
    pub params: Params,
    /// Unconsumed path for a nested router.
    pub rest: Option<String>,
    #[serde(skip)]
    matched: MatchResult,
}

impl RouteProps {
    /// Combine a location, the enclosing params and a match.
    pub fn new(location: &Location, path: &str, outer: &Params, matched: MatchResult) -> Self {
        let mut params = outer.clone();
        params.extend(matched.params.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            url: location.url().to_string(),
            path: path.to_string(),
            query: location.query().clone(),
            params,
            rest: matched.rest.clone(),
            matched,
        }
    }

    /// Flat lookup: this route's bindings first (first occurrence wins),
    /// then enclosing params, then the query string.
    pub fn get(&self, name: &str) -> Option<&str> {
        if self.matched.is_declared(name) {
            return self.matched.get(name);
        }
        self.params
            .get(name)
            .and_then(|v| v.as_deref())
            .or_else(|| self.query.get(name).map(String::as_str))
    }

    /// The raw match this route was selected with.
    pub fn matched(&self) -> &MatchResult {
        &self.matched
    }
}

/// A route component paired with its props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtree<C> {
    pub component: C,
    pub props: RouteProps,
}

impl<C> Subtree<C> {
    pub fn new(component: C, props: RouteProps) -> Self {
        Self { component, props }
    }
}
