//! The responsive context: active state, configuration and the change
//! notification registry.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::{
    Breakpoints, Config, Dispose, Orientation, Platform, Resolver, ScaleConfig, StyleMap,
    StyleSheet, StyleValue, Subscription, ValueFn, Viewport,
};

pub type Listener = Rc<dyn Fn()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Breakpoint, orientation and width as currently seen by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveState {
    pub breakpoint: String,
    pub orientation: Orientation,
    pub width: f32,
    pub pinned: bool,
}

/// Handle to one responsive engine instance.
///
/// Cloning is cheap and every clone shares the same state and listeners.
/// Independent instances (one per window, one per test) don't interact.
#[derive(Clone)]
pub struct Responsive {
    inner: Rc<Inner>,
}

struct Inner {
    viewport: Rc<dyn Viewport>,
    state: RefCell<State>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<u64>,
}

struct State {
    breakpoints: Breakpoints,
    breakpoint: String,
    // set by explicit assignment; stops width-driven updates until reset()
    pinned: bool,
    scale: ScaleConfig,
    value: Option<ValueFn>,
}

impl Responsive {
    pub fn new(viewport: Rc<dyn Viewport>) -> Self {
        let breakpoints = Breakpoints::default();
        let breakpoint = breakpoints.active_for(viewport.window().width).to_string();
        Self {
            inner: Rc::new(Inner {
                viewport,
                state: RefCell::new(State {
                    breakpoints,
                    breakpoint,
                    pinned: false,
                    scale: ScaleConfig::default(),
                    value: None,
                }),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn with_config(viewport: Rc<dyn Viewport>, config: Config) -> Self {
        let cx = Self::new(viewport);
        cx.configure(config);
        cx
    }

    pub fn viewport(&self) -> &Rc<dyn Viewport> {
        &self.inner.viewport
    }

    pub fn width(&self) -> f32 {
        self.inner.viewport.window().width
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.inner.viewport.screen())
    }

    pub fn platform(&self) -> Platform {
        self.inner.viewport.platform()
    }

    pub fn breakpoint(&self) -> String {
        self.inner.state.borrow().breakpoint.clone()
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.inner.state.borrow().breakpoints.clone()
    }

    pub fn is_pinned(&self) -> bool {
        self.inner.state.borrow().pinned
    }

    pub fn scale_config(&self) -> ScaleConfig {
        self.inner.state.borrow().scale
    }

    pub fn state(&self) -> ActiveState {
        let state = self.inner.state.borrow();
        ActiveState {
            breakpoint: state.breakpoint.clone(),
            orientation: self.orientation(),
            width: self.width(),
            pinned: state.pinned,
        }
    }

    /// Pins the active breakpoint and broadcasts. Viewport changes no
    /// longer move it until [`reset`](Self::reset).
    pub fn set_breakpoint(&self, name: impl Into<String>) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.breakpoint = name.into();
            state.pinned = true;
            log::debug!("breakpoint pinned to `{}`", state.breakpoint);
        }
        self.broadcast();
    }

    /// Recomputes the active breakpoint from the window width unless it is
    /// pinned.
    pub fn update_breakpoint(&self) {
        let width = self.width();
        let mut state = self.inner.state.borrow_mut();
        if state.pinned {
            return;
        }
        let next = state.breakpoints.active_for(width).to_string();
        if next != state.breakpoint {
            log::debug!("breakpoint `{}` -> `{next}` at width {width}", state.breakpoint);
            state.breakpoint = next;
        }
    }

    /// Applies `config`. The breakpoint table is replaced, the scale
    /// configuration merged. Does not broadcast.
    pub fn configure(&self, config: Config) {
        let mut state = self.inner.state.borrow_mut();
        if let Some(breakpoints) = config.breakpoints {
            state.breakpoints = breakpoints;
            if config.breakpoint.is_none() && !state.breakpoints.contains(&state.breakpoint) {
                state.breakpoint = state.breakpoints.first().to_string();
            }
        }
        if let Some(breakpoint) = config.breakpoint {
            state.breakpoint = breakpoint;
            state.pinned = true;
        }
        if let Some(scale) = config.scale {
            state.scale.merge(scale);
        }
        if let Some(value) = config.value {
            state.value = Some(value);
        }
    }

    /// Unpins the breakpoint, recomputes it from the width and restores the
    /// default scale configuration.
    pub fn reset(&self) {
        let width = self.width();
        let mut state = self.inner.state.borrow_mut();
        state.pinned = false;
        state.breakpoint = state.breakpoints.active_for(width).to_string();
        state.scale = ScaleConfig::default();
    }

    /// Scales a single number with the current calculator, regardless of
    /// which property it is for.
    pub fn value(&self, value: f32) -> f32 {
        self.resolver().scale(value)
    }

    pub fn resolver(&self) -> Resolver {
        let state = self.inner.state.borrow();
        Resolver {
            breakpoints: state.breakpoints.clone(),
            breakpoint: state.breakpoint.clone(),
            orientation: self.orientation(),
            platform: self.platform(),
            width: self.width(),
            scale: state.scale,
            value: state.value.clone(),
        }
    }

    pub fn resolve(&self, property: &str, raw: &StyleValue) -> Option<StyleValue> {
        self.resolver().resolve(property, raw)
    }

    pub fn resolve_map(&self, map: &StyleMap) -> StyleMap {
        self.resolver().resolve_map(map)
    }

    /// Wraps a sheet of named style blocks into lazily resolving views.
    pub fn create_styles<I, K>(&self, sheet: I) -> StyleSheet
    where
        I: IntoIterator<Item = (K, StyleMap)>,
        K: Into<String>,
    {
        StyleSheet::new(self.clone(), sheet)
    }

    pub fn register(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        log::trace!("listener {id:?} registered");
        id
    }

    /// Returns whether `id` was still registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(other, _)| *other != id);
        before != listeners.len()
    }

    /// Like [`register`](Self::register), removed again when the returned
    /// guard is dropped.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.register(listener);
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        Subscription::new(Dispose::new(move || {
            if let Some(inner) = weak.upgrade() {
                Responsive { inner }.remove(id);
            }
        }))
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.inner
            .listeners
            .borrow()
            .iter()
            .any(|(other, _)| *other == id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Recomputes the breakpoint, then calls every listener in registration
    /// order. Listeners removed during the broadcast are skipped; listeners
    /// added during it are first called by the next one.
    pub fn broadcast(&self) {
        self.update_breakpoint();
        let listeners: Vec<(ListenerId, Listener)> = self.inner.listeners.borrow().clone();
        log::debug!("broadcasting to {} listeners", listeners.len());
        for (id, listener) in listeners {
            if self.is_registered(id) {
                listener();
            }
        }
    }

    /// Entry point for host resize and rotation events.
    pub fn viewport_changed(&self) {
        self.broadcast();
    }
}

impl fmt::Debug for Responsive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Responsive")
            .field("breakpoints", &state.breakpoints)
            .field("breakpoint", &state.breakpoint)
            .field("pinned", &state.pinned)
            .field("scale", &state.scale)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}
