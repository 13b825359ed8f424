//! Lazily loaded components.
//!
//! # Responsibilities
//! - Wrap an async factory so it runs at most once
//! - Report `Ready` once loaded, `Suspended` while loading
//! - Let hosts start a load early (`preload`) without rendering
//!
//! # Design Decisions
//! - All callers share one `Shared` future; the first poll drives the load
//! - A failed load stays failed and surfaces as `RenderError::Load`
//! - Single-threaded: `Rc`/`RefCell`, no `Send` bound on the factory

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures_util::future::{FutureExt, LocalBoxFuture, Shared};

use crate::render::{LoadError, Pending, RenderError};

type LoadFuture<T> = Shared<LocalBoxFuture<'static, Result<T, LoadError>>>;
type Factory<T> = Box<dyn FnOnce() -> LocalBoxFuture<'static, Result<T, LoadError>>>;

struct LazyInner<T> {
    factory: Option<Factory<T>>,
    load: Option<LoadFuture<T>>,
}

/// Result of asking a lazy component for its value.
#[derive(Debug)]
pub enum LazyStatus<T> {
    Ready(T),
    Suspended(Pending),
}

/// A value produced by an async factory on first use.
pub struct Lazy<T> {
    inner: Rc<RefCell<LazyInner<T>>>,
}

impl<T> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Lazy")
            .field("started", &inner.load.is_some())
            .finish()
    }
}

impl<T: Clone + 'static> Lazy<T> {
    pub fn new<F, Fut>(factory: F) -> Self
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = Result<T, LoadError>> + 'static,
    {
        let factory: Factory<T> = Box::new(move || factory().boxed_local());
        Self {
            inner: Rc::new(RefCell::new(LazyInner {
                factory: Some(factory),
                load: None,
            })),
        }
    }

    /// Ask for the value, starting the load if needed.
    pub fn load(&self) -> Result<LazyStatus<T>, RenderError> {
        let load = self.start();
        match load.peek() {
            Some(Ok(value)) => Ok(LazyStatus::Ready(value.clone())),
            Some(Err(e)) => Err(RenderError::Load(e.clone())),
            None => Ok(LazyStatus::Suspended(Pending::new(load.map(|_| ())))),
        }
    }

    /// Start loading without rendering. The returned handle resolves when
    /// the load finishes; driving it is optional.
    pub fn preload(&self) -> Pending {
        Pending::new(self.start().map(|_| ()))
    }

    /// True once the factory's future has completed successfully.
    pub fn is_loaded(&self) -> bool {
        let inner = self.inner.borrow();
        matches!(inner.load.as_ref().and_then(|l| l.peek()), Some(Ok(_)))
    }

    fn start(&self) -> LoadFuture<T> {
        let mut inner = self.inner.borrow_mut();
        if let Some(load) = &inner.load {
            return load.clone();
        }

        let load = match inner.factory.take() {
            Some(factory) => factory().shared(),
            None => futures_util::future::ready(Err(LoadError::new("lazy factory was consumed")))
                .boxed_local()
                .shared(),
        };
        tracing::debug!("Lazy component load started");
        inner.load = Some(load.clone());
        load
    }
}
