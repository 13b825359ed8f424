//! Path matching logic.
//!
//! # Responsibilities
//! - Walk path segments against pattern segments index by index
//! - Bind named parameters (percent-decoded)
//! - Capture trailing segments for rest parameters and wildcards
//!
//! # Design Decisions
//! - Pure: same `(path, pattern)` always yields an equal result
//! - Never errors; a mismatch (including a malformed pattern) is `None`
//! - Literals compare raw, parameters are decoded
//! - Undecodable segments (bad percent-encoding, invalid UTF-8) fail the match
//! - No regex to guarantee O(n) matching

use std::borrow::Cow;
use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::routing::segment::{split_segments, Modifier, Pattern, Segment};

/// Parameter bindings. `None` marks a declared parameter with no value.
pub type Params = HashMap<String, Option<String>>;

/// Result of a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Bound parameters. A name bound twice keeps the last value.
    pub params: Params,
    /// Unconsumed trailing path captured by a bare `*`, for nested routing.
    pub rest: Option<String>,
    /// Flat view of the bindings where the first occurrence of a name wins.
    #[serde(skip)]
    flat: Params,
}

impl MatchResult {
    /// Look up a parameter through the flat view.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.flat.get(name).and_then(|v| v.as_deref())
    }

    /// Look up a parameter through `params`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|v| v.as_deref())
    }

    /// True if the name was declared by the pattern, bound or not.
    pub fn is_declared(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// The flat mapping.
    pub fn flat(&self) -> &Params {
        &self.flat
    }

    fn bind(&mut self, name: &str, value: Option<String>) {
        self.flat
            .entry(name.to_string())
            .or_insert_with(|| value.clone());
        self.params.insert(name.to_string(), value);
    }
}

/// Match `path` against a pattern string.
pub fn match_path(path: &str, pattern: &str) -> Option<MatchResult> {
    Pattern::parse(pattern).match_path(path)
}

impl Pattern {
    /// Match `path` against this pattern.
    pub fn match_path(&self, path: &str) -> Option<MatchResult> {
        let path_segments: Vec<&str> = split_segments(path).collect();
        let pattern_segments = self.segments();
        let mut result = MatchResult::default();

        let len = path_segments.len().max(pattern_segments.len());
        for i in 0..len {
            let value = path_segments.get(i).copied();

            // Path is longer than the pattern and nothing absorbed the tail.
            let segment = pattern_segments.get(i)?;

            match segment {
                Segment::Literal(text) => {
                    if value != Some(text.as_str()) {
                        return None;
                    }
                }
                Segment::Wildcard => {
                    value?;
                    let tail = decode_join(&path_segments[i..])?;
                    result.rest = Some(format!("/{}", tail));
                    break;
                }
                Segment::Param { name, modifier } => match modifier {
                    Modifier::Required => {
                        let decoded = decode(value?)?;
                        result.bind(name, Some(decoded.into_owned()));
                    }
                    Modifier::Optional => {
                        let decoded = match value {
                            Some(raw) => Some(decode(raw)?.into_owned()),
                            None => None,
                        };
                        result.bind(name, decoded);
                    }
                    Modifier::ZeroOrMore | Modifier::OneOrMore => {
                        let remaining = path_segments.get(i..).unwrap_or_default();
                        if remaining.is_empty() && *modifier == Modifier::OneOrMore {
                            return None;
                        }
                        let joined = decode_join(remaining)?;
                        let bound = if joined.is_empty() { None } else { Some(joined) };
                        result.bind(name, bound);
                        break;
                    }
                },
            }
        }

        Some(result)
    }
}

fn decode(raw: &str) -> Option<Cow<'_, str>> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            tracing::debug!(segment = %raw, "Undecodable path segment, rejecting match");
            None
        }
    }
}

fn decode_join(segments: &[&str]) -> Option<String> {
    let decoded = segments
        .iter()
        .map(|s| decode(s))
        .collect::<Option<Vec<_>>>()?;
    Some(decoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let m = match_path("/about/team", "/about/team").unwrap();
        assert!(m.params.is_empty());
        assert_eq!(m.rest, None);

        // Leading/trailing slashes are insignificant
        assert!(match_path("about/team/", "/about/team").is_some());
        assert!(match_path("/", "").is_some());
        assert!(match_path("/", "/").is_some());
    }

    #[test]
    fn test_literal_mismatch() {
        assert!(match_path("/a/b", "/a/c").is_none());
        assert!(match_path("/a/b/c", "/a/b").is_none());
        assert!(match_path("/a", "/a/b").is_none());
    }

    #[test]
    fn test_required_param() {
        let m = match_path("/profile/123", "/profile/:id").unwrap();
        assert_eq!(m.param("id"), Some("123"));
        assert_eq!(m.get("id"), Some("123"));
        assert!(match_path("/profile", "/profile/:id").is_none());
    }

    #[test]
    fn test_optional_param() {
        let m = match_path("/profile", "/profile/:id?").unwrap();
        assert_eq!(m.param("id"), None);
        assert!(m.is_declared("id"));

        let m = match_path("/profile/123", "/profile/:id?").unwrap();
        assert_eq!(m.param("id"), Some("123"));
    }

    #[test]
    fn test_zero_or_more_param() {
        let m = match_path("/profile/123/abc", "/profile/:id*").unwrap();
        assert_eq!(m.param("id"), Some("123/abc"));

        let m = match_path("/profile", "/profile/:id*").unwrap();
        assert_eq!(m.param("id"), None);
    }

    #[test]
    fn test_one_or_more_param() {
        let m = match_path("/profile/123/abc", "/profile/:id+").unwrap();
        assert_eq!(m.param("id"), Some("123/abc"));
        assert!(match_path("/profile", "/profile/:id+").is_none());
    }

    #[test]
    fn test_wildcard_rest() {
        let m = match_path("/profile/123/abc", "/profile/:id/*").unwrap();
        assert_eq!(m.param("id"), Some("123"));
        assert_eq!(m.rest.as_deref(), Some("/abc"));

        let m = match_path("/files/a%20b/c", "/files/*").unwrap();
        assert_eq!(m.rest.as_deref(), Some("/a b/c"));

        // Nothing left for the wildcard to capture
        assert!(match_path("/files", "/files/*").is_none());
    }

    #[test]
    fn test_params_are_decoded_literals_are_not() {
        let m = match_path("/tag/c%23", "/tag/:name").unwrap();
        assert_eq!(m.param("name"), Some("c#"));

        assert!(match_path("/a%20b", "/a b").is_none());
        assert!(match_path("/a%20b", "/a%20b").is_some());
    }

    #[test]
    fn test_malformed_encoding_fails() {
        assert!(match_path("/tag/%E0%A4%A", "/tag/:name").is_none());
        assert!(match_path("/tag/%FF", "/tag/:name").is_none());
    }

    #[test]
    fn test_duplicate_names() {
        let m = match_path("/a/b", "/:x/:x").unwrap();
        // params: last wins, flat view: first wins
        assert_eq!(m.param("x"), Some("b"));
        assert_eq!(m.get("x"), Some("a"));
    }

    #[test]
    fn test_idempotent() {
        let a = match_path("/docs/guide/intro", "/docs/:section/*");
        let b = match_path("/docs/guide/intro", "/docs/:section/*");
        assert_eq!(a, b);
    }
}
