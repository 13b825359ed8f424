//! Shared utilities for transition integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tokio::sync::oneshot;
use transit_router::render::{
    Lazy, LazyStatus, LoadError, RenderEngine, RenderError, RenderStatus, Subtree, Suspension,
};
use transit_router::transition::{Lifecycle, Viewport};

pub type Component = &'static str;

/// Component that always fails to render.
pub const BOOM: Component = "boom";

/// Render engine driven by a script of lazily loaded components.
///
/// Output is `"<component>:<path>"`. Components registered with
/// [`ScriptedEngine::gated`] suspend until their gate is opened.
#[derive(Default)]
pub struct ScriptedEngine {
    lazies: HashMap<Component, Vec<Lazy<Component>>>,
    partials: HashMap<Component, String>,
    discarded: Rc<RefCell<Vec<String>>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `component` lazy; it loads once the returned gate fires.
    /// Gating a component again adds a dependency it waits on after the
    /// earlier ones.
    pub fn gated(&mut self, component: Component) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel::<()>();
        let lazy = Lazy::new(move || async move {
            rx.await.map_err(|_| LoadError::new("gate dropped"))?;
            Ok::<_, LoadError>(component)
        });
        self.lazies.entry(component).or_default().push(lazy);
        tx
    }

    /// Make `component` lazy with a load that fails.
    pub fn failing(&mut self, component: Component, message: &'static str) {
        let lazy = Lazy::<Component>::new(move || async move { Err(LoadError::new(message)) });
        self.lazies.entry(component).or_default().push(lazy);
    }

    /// Placeholder output left behind while `component` suspends.
    pub fn with_partial(&mut self, component: Component, partial: &str) {
        self.partials.insert(component, partial.to_string());
    }

    /// Outputs handed back through `discard`.
    pub fn discarded(&self) -> Rc<RefCell<Vec<String>>> {
        self.discarded.clone()
    }
}

impl RenderEngine<Component> for ScriptedEngine {
    type Output = String;

    fn render(
        &mut self,
        subtree: &Subtree<Component>,
    ) -> Result<RenderStatus<String>, RenderError> {
        let component = subtree.component;
        if component == BOOM {
            return Err(RenderError::Component {
                component: component.to_string(),
                message: "exploded".to_string(),
            });
        }

        for lazy in self.lazies.get(component).into_iter().flatten() {
            if let LazyStatus::Suspended(pending) = lazy.load()? {
                let mut suspension = Suspension::new(pending);
                if let Some(partial) = self.partials.get(component) {
                    suspension = suspension.with_partial(partial.clone());
                }
                return Ok(RenderStatus::Suspended(suspension));
            }
        }

        Ok(RenderStatus::Ready(format!("{}:{}", component, subtree.props.path)))
    }

    fn discard(&mut self, output: String) {
        self.discarded.borrow_mut().push(output);
    }
}

/// Records lifecycle callbacks as `"<event>:<url>"`.
#[derive(Clone, Default)]
pub struct Events(Rc<RefCell<Vec<String>>>);

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        let route_change = self.0.clone();
        let load_start = self.0.clone();
        let load_end = self.0.clone();
        Lifecycle::new()
            .on_route_change(move |url| {
                route_change.borrow_mut().push(format!("route_change:{url}"))
            })
            .on_load_start(move |url| load_start.borrow_mut().push(format!("load_start:{url}")))
            .on_load_end(move |url| load_end.borrow_mut().push(format!("load_end:{url}")))
    }

    pub fn recorded(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Counts scroll resets.
#[derive(Clone, Default)]
pub struct ScrollCounter(Rc<Cell<usize>>);

impl ScrollCounter {
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

impl Viewport for ScrollCounter {
    fn scroll_to_top(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}
