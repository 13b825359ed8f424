//! Location snapshots.
//!
//! - `url`: path plus query string as navigated to (fragment dropped)
//! - `path`: path component, trailing slashes removed, never empty
//! - `query`: decoded query pairs, a repeated key keeps its last value

use std::collections::HashMap;

use serde::Serialize;

/// Immutable snapshot of the current URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    url: String,
    path: String,
    query: HashMap<String, String>,
}

impl Location {
    /// Parse a navigation target such as `/profile/1/?tab=posts#top`.
    pub fn parse(url: &str) -> Self {
        let without_fragment = url.split('#').next().unwrap_or_default();
        let (raw_path, raw_query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        let query = url::form_urlencoded::parse(raw_query.as_bytes())
            .into_owned()
            .collect();

        Self {
            url: without_fragment.to_string(),
            path: normalize_path(raw_path),
            query,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    /// Single query value.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Strip trailing slashes and ensure a leading one. `""` and `"///"` become `/`.
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
