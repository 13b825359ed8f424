//! Route transition subsystem.
//!
//! # Data Flow
//! ```text
//! LocationChange (or enclosing RouteContext for nested routing)
//!     → controller.rs (select route, detect route change)
//!         → generation.rs (advance on route change)
//!         → RenderEngine::render (speculative)
//!             Ready     → slot.rs commit, lifecycle.rs callbacks
//!             Suspended → slot.rs hold previous, onLoadStart,
//!                         continuation tagged with the generation
//!     → continuation resolves
//!         stale   → discarded
//!         current → Settling → re-render → commit, onLoadEnd
//!
//! driver.rs feeds LocationState changes and continuations into the
//! controller from a single task.
//! ```
//!
//! # Design Decisions
//! - One controller owns its generation counter and slots; nothing is shared
//! - Cancellation is by generation comparison only
//! - Push vs replace travels on the `LocationChange`, never in ambient state

pub mod controller;
pub mod driver;
pub mod generation;
pub mod lifecycle;
pub mod slot;

pub use controller::{RouteContext, Settlement, Transition, TransitionController, TransitionState};
pub use driver::TransitionDriver;
pub use generation::{Generation, GenerationCounter};
pub use lifecycle::{Lifecycle, Viewport};
pub use slot::{Mounted, RenderSlots};
