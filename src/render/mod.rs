//! Rendering collaborator contracts.
//!
//! # Data Flow
//! ```text
//! TransitionController builds a Subtree (component + RouteProps)
//!     → RenderEngine::render (speculative, nothing committed yet)
//!     → RenderStatus::Ready(output)          → controller commits output
//!     → RenderStatus::Suspended(suspension)  → controller keeps the previous
//!                                              output visible and awaits
//!                                              `suspension.pending`
//!     → Err(RenderError)                     → propagated to the caller /
//!                                              error boundary (boundary.rs)
//! ```
//!
//! # Design Decisions
//! - The engine renders off to the side; committing is the controller's call
//! - Suspension is a value, not an error: only real failures use `Err`
//! - Awaitables are `!Send` boxed futures; everything runs on one thread

pub mod boundary;
pub mod lazy;
pub mod subtree;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::future::{FutureExt, LocalBoxFuture};
use thiserror::Error;

pub use boundary::ErrorBoundary;
pub use lazy::{Lazy, LazyStatus};
pub use subtree::{RouteProps, Subtree};

/// A lazy component's load failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LoadError(pub String);

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Rendering failures. Suspension is not one of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A component raised an error while rendering.
    #[error("component `{component}` failed to render: {message}")]
    Component { component: String, message: String },

    /// A lazily loaded component could not be loaded.
    #[error("lazy load failed: {0}")]
    Load(#[from] LoadError),
}

/// Opaque awaitable handed out by a suspended render.
pub struct Pending(LocalBoxFuture<'static, ()>);

impl Pending {
    pub fn new(fut: impl Future<Output = ()> + 'static) -> Self {
        Self(fut.boxed_local())
    }

    /// An awaitable that is already resolved.
    pub fn resolved() -> Self {
        Self::new(futures_util::future::ready(()))
    }
}

impl Future for Pending {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.0.as_mut().poll(cx)
    }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pending(..)")
    }
}

/// A render that could not complete yet.
#[derive(Debug)]
pub struct Suspension<O> {
    /// Resolves when the missing dependency is available.
    pub pending: Pending,
    /// Placeholder output left behind by the attempt, if any.
    pub partial: Option<O>,
}

impl<O> Suspension<O> {
    pub fn new(pending: Pending) -> Self {
        Self {
            pending,
            partial: None,
        }
    }

    pub fn with_partial(mut self, partial: O) -> Self {
        self.partial = Some(partial);
        self
    }
}

/// Outcome of one speculative render.
#[derive(Debug)]
pub enum RenderStatus<O> {
    Ready(O),
    Suspended(Suspension<O>),
}

/// Rendering engine collaborator.
pub trait RenderEngine<C> {
    /// Committed output of a subtree (a handle, markup, a node id ...).
    type Output: Clone + PartialEq + fmt::Debug;

    /// Render `subtree` without committing it.
    fn render(&mut self, subtree: &Subtree<C>) -> Result<RenderStatus<Self::Output>, RenderError>;

    /// Remove placeholder output that was never meant to be final.
    fn discard(&mut self, output: Self::Output) {
        let _ = output;
    }
}
