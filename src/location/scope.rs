//! Navigation scope.
//!
//! A scope decides which links this router intercepts. Links outside the
//! scope fall through to native navigation.

use regex::Regex;

use crate::config::LocationConfig;

#[derive(Debug, Clone)]
pub enum Scope {
    /// Intercept hrefs starting with this prefix.
    Prefix(String),
    /// Intercept hrefs the expression matches.
    Pattern(Regex),
}

impl Scope {
    /// Build a scope from config. Returns `Ok(None)` when no scope is set.
    pub fn from_config(config: &LocationConfig) -> Result<Option<Self>, regex::Error> {
        if let Some(pattern) = &config.scope_pattern {
            return Ok(Some(Scope::Pattern(Regex::new(pattern)?)));
        }
        Ok(config.scope_prefix.clone().map(Scope::Prefix))
    }

    pub fn allows(&self, href: &str) -> bool {
        match self {
            Scope::Prefix(prefix) => href.starts_with(prefix.as_str()),
            Scope::Pattern(re) => re.is_match(href),
        }
    }
}
