//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Link interception scope.
    pub location: LocationConfig,

    /// Transition behaviour.
    pub transition: TransitionConfig,

    /// Declared routes, in matching order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Location / link interception configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LocationConfig {
    /// Only intercept links whose href starts with this prefix.
    pub scope_prefix: Option<String>,

    /// Only intercept links whose href matches this regular expression.
    pub scope_pattern: Option<String>,
}

/// Transition controller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Scroll to the top after a route-changing push navigation commits.
    pub scroll_to_top_on_push: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            scroll_to_top_on_push: true,
        }
    }
}

/// A declared route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Pattern such as `/users/:id`. May be empty for default routes.
    #[serde(default)]
    pub path: String,

    /// Component name rendered for this route.
    pub component: String,

    /// Fallback used when no other route matches.
    #[serde(default)]
    pub default: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record navigation metrics.
    pub metrics_enabled: bool,

    /// Colored log output.
    pub ansi: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            ansi: true,
        }
    }
}
