//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route declaration (at construction):
//!     RoutePattern[] (ordered, optional default)
//!     → segment.rs (parse each pattern into segments)
//!     → Freeze as immutable RouteTable
//!
//! Path resolution (every render cycle):
//!     path (location path or enclosing `rest`)
//!     → router.rs (scan routes in order)
//!     → matcher.rs (walk segments, bind params, capture rest)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at construction, immutable afterwards
//! - No regex in the hot path
//! - Deterministic: same input always matches same route
//! - First match wins; defaults are a last resort

pub mod matcher;
pub mod router;
pub mod segment;

pub use matcher::{match_path, MatchResult, Params};
pub use router::{RouteMatch, RoutePattern, RouteTable};
pub use segment::{Modifier, Pattern, Segment};
