//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route patterns for segments that can never match
//! - Detect conflicting routes and scope settings
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - The matcher itself stays lenient; strictness lives here

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use crate::config::schema::{LocationConfig, RouteConfig, RouterConfig};
use crate::routing::{Pattern, Segment};

/// One semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty component name")]
    EmptyComponent { index: usize },

    #[error("route `{path}` is declared more than once")]
    DuplicateRoute { path: String },

    #[error(
        "route `{path}`: `{segment}` consumes the rest of the path but is not the last segment"
    )]
    UnreachableSegments { path: String, segment: String },

    #[error("route `{path}` has a parameter without a name")]
    UnnamedParam { path: String },

    #[error("scope_prefix and scope_pattern are mutually exclusive")]
    ConflictingScope,

    #[error("scope_pattern is not a valid regular expression: {0}")]
    InvalidScopePattern(String),
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_location(&config.location);
    errors.extend(validate_routes(&config.routes));

    let defaults = config.routes.iter().filter(|r| r.default).count();
    if defaults > 1 {
        tracing::warn!(count = defaults, "Multiple default routes declared, the first one wins");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_location(config: &LocationConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if config.scope_prefix.is_some() && config.scope_pattern.is_some() {
        errors.push(ValidationError::ConflictingScope);
    }
    if let Some(pattern) = &config.scope_pattern {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError::InvalidScopePattern(e.to_string()));
        }
    }
    errors
}

fn validate_routes(routes: &[RouteConfig]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, route) in routes.iter().enumerate() {
        if route.component.trim().is_empty() {
            errors.push(ValidationError::EmptyComponent { index });
        }

        let pattern = Pattern::parse(&route.path);
        // Compare by segments so "/a/" and "a" count as the same route
        if !route.default && !seen.insert(pattern.segments().to_vec()) {
            errors.push(ValidationError::DuplicateRoute {
                path: route.path.clone(),
            });
        }

        let segments = pattern.segments();
        if let Some(terminal) = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .find(|s| s.is_terminal())
        {
            errors.push(ValidationError::UnreachableSegments {
                path: route.path.clone(),
                segment: terminal.to_string(),
            });
        }

        if segments
            .iter()
            .any(|s| matches!(s, Segment::Param { name, .. } if name.is_empty()))
        {
            errors.push(ValidationError::UnnamedParam {
                path: route.path.clone(),
            });
        }
    }

    errors
}
