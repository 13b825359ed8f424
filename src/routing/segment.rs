//! Pattern segment grammar.
//!
//! # Grammar
//! ```text
//! segment   := literal | "*" | param
//! param     := ":" name modifier?
//! modifier  := "?" | "*" | "+"
//! ```
//!
//! # Design Decisions
//! - Patterns are split on `/` with empty segments dropped, so leading,
//!   trailing and doubled slashes carry no meaning
//! - Literals keep their raw text; only the exact segment `*` is a wildcard
//! - Parsing never fails: anything that is not a parameter is a literal

use std::fmt;

/// Cardinality of a named parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `:name` - exactly one segment.
    Required,
    /// `:name?` - zero or one segment.
    Optional,
    /// `:name*` - zero or more segments, consumes the rest of the path.
    ZeroOrMore,
    /// `:name+` - one or more segments, consumes the rest of the path.
    OneOrMore,
}

impl Modifier {
    fn from_suffix(c: char) -> Option<Self> {
        match c {
            '?' => Some(Modifier::Optional),
            '*' => Some(Modifier::ZeroOrMore),
            '+' => Some(Modifier::OneOrMore),
            _ => None,
        }
    }

    /// True for `*` and `+`, which terminate matching.
    pub fn is_rest(self) -> bool {
        matches!(self, Modifier::ZeroOrMore | Modifier::OneOrMore)
    }

    fn suffix(self) -> &'static str {
        match self {
            Modifier::Required => "",
            Modifier::Optional => "?",
            Modifier::ZeroOrMore => "*",
            Modifier::OneOrMore => "+",
        }
    }
}

/// One `/`-delimited piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the path segment byte for byte.
    Literal(String),
    /// Bare `*`: captures every remaining path segment into `rest`.
    Wildcard,
    /// `:name` with an optional modifier.
    Param { name: String, modifier: Modifier },
}

impl Segment {
    /// Parse a single segment. Never fails.
    pub fn parse(raw: &str) -> Self {
        if raw == "*" {
            return Segment::Wildcard;
        }

        let Some(body) = raw.strip_prefix(':') else {
            return Segment::Literal(raw.to_string());
        };

        let (name, modifier) = match body.chars().last().and_then(Modifier::from_suffix) {
            Some(modifier) => (&body[..body.len() - 1], modifier),
            None => (body, Modifier::Required),
        };

        Segment::Param {
            name: name.to_string(),
            modifier,
        }
    }

    /// True if this segment consumes all remaining path segments.
    pub fn is_terminal(&self) -> bool {
        match self {
            Segment::Wildcard => true,
            Segment::Param { modifier, .. } => modifier.is_rest(),
            Segment::Literal(_) => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Wildcard => f.write_str("*"),
            Segment::Param { name, modifier } => write!(f, ":{}{}", name, modifier.suffix()),
        }
    }
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern string such as `/users/:id/*`.
    pub fn parse(source: &str) -> Self {
        Self {
            source: source.to_string(),
            segments: split_segments(source).map(Segment::parse).collect(),
        }
    }

    /// The pattern as it was declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split a path or pattern on `/`, dropping empty segments.
pub fn split_segments(input: &str) -> impl Iterator<Item = &str> {
    input.split('/').filter(|s| !s.is_empty())
}
