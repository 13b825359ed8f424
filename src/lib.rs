//! URL-aware routing with suspense-aware route transitions.
//!
//! # Architecture Overview
//!
//! ```text
//!   navigate / link click / back-forward
//!        │
//!        ▼
//!   ┌──────────────┐  LocationChange   ┌────────────────────────────────────┐
//!   │   location   │──────────────────▶│             transition             │
//!   │ state, scope │   (watch chan)    │  controller ──▶ routing (matcher)  │
//!   └──────────────┘                   │      │                             │
//!                                      │      ▼                             │
//!                                      │  render engine (speculative)       │
//!                                      │      │ Ready / Suspended / Err     │
//!                                      │      ▼                             │
//!                                      │  slots + lifecycle callbacks       │
//!                                      └──────────────┬─────────────────────┘
//!                                                     │ Err
//!                                                     ▼
//!                                               error boundary
//!
//!   Cross-cutting: config (TOML), observability (tracing, metrics)
//! ```

pub mod config;
pub mod location;
pub mod observability;
pub mod render;
pub mod routing;
pub mod transition;

pub use config::schema::RouterConfig;
pub use location::{Location, LocationChange, LocationState, NavigationKind, NavigationRequest};
pub use render::{RenderEngine, RenderError, RenderStatus, Subtree};
pub use routing::{match_path, MatchResult, RoutePattern, RouteTable};
pub use transition::{TransitionController, TransitionDriver};
