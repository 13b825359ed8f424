//! Error boundary collaborator.
//!
//! Receives render failures the transition controller propagates. The
//! controller never retries; recovery and reporting live here.

use std::fmt;

use crate::observability::metrics;
use crate::render::RenderError;

type ErrorHook = Box<dyn FnMut(&RenderError)>;

/// Catches render failures and reports them through an optional hook.
#[derive(Default)]
pub struct ErrorBoundary {
    on_error: Option<ErrorHook>,
    caught: Vec<RenderError>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per caught failure.
    pub fn on_error(mut self, hook: impl FnMut(&RenderError) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Pass a value through, catching the error case.
    pub fn capture<T>(&mut self, result: Result<T, RenderError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(error = %error, "Render failed, caught by error boundary");
                metrics::record_render_failure();
                if let Some(hook) = self.on_error.as_mut() {
                    hook(&error);
                }
                self.caught.push(error);
                None
            }
        }
    }

    /// Failures caught so far, oldest first.
    pub fn caught(&self) -> &[RenderError] {
        &self.caught
    }

    pub fn last_error(&self) -> Option<&RenderError> {
        self.caught.last()
    }

    /// Clear caught failures (e.g. after a retry button).
    pub fn reset(&mut self) {
        self.caught.clear();
    }
}

impl fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("caught", &self.caught)
            .finish()
    }
}
