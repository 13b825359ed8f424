//! Location subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation request {url, replace} / link activation / back-forward
//!     → state.rs (write history, classify push/replace/pop)
//!     → snapshot.rs (parse url into path + query)
//!     → LocationChange published on a watch channel
//!     → consumed by the transition controller every render cycle
//! ```
//!
//! # Design Decisions
//! - Location is an immutable snapshot, replaced on every navigation
//! - Link interception honours an optional per-instance scope (scope.rs)
//! - History is a trait so hosts can plug in a browser-backed one

pub mod scope;
pub mod state;
pub mod snapshot;

pub use scope::Scope;
pub use state::{
    History, LinkActivation, LinkOutcome, LocationChange, LocationState, MemoryHistory,
    NavigationKind, NavigationRequest,
};
pub use snapshot::Location;
