//! A subtree that is rebuilt on every broadcast.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use responsive_core::{Responsive, StyleMap, Subscription, style};

/// Key and style of the container a [`RerenderBoundary`] renders into. The
/// key changes with every rebuild so hosts discard the old subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub key: u64,
    pub style: StyleMap,
}

struct Inner<T> {
    cx: Responsive,
    key: Cell<u64>,
    style: RefCell<StyleMap>,
    children: Box<dyn Fn(&Responsive) -> T>,
    output: RefCell<T>,
}

impl<T> Inner<T> {
    fn rebuild(&self) {
        let output = (self.children)(&self.cx);
        *self.output.borrow_mut() = output;
        self.key.set(self.key.get() + 1);
    }
}

/// Runs `children` once up front and again after every broadcast of the
/// context. Useful for plain views that read [`LazyStyle`](responsive_core::LazyStyle)s
/// and have no handle to patch.
pub struct RerenderBoundary<T: 'static> {
    inner: Rc<Inner<T>>,
    _subscription: Subscription,
}

impl<T: 'static> RerenderBoundary<T> {
    pub fn new(cx: &Responsive, children: impl Fn(&Responsive) -> T + 'static) -> Self {
        let output = children(cx);
        let inner = Rc::new(Inner {
            cx: cx.clone(),
            key: Cell::new(0),
            style: RefCell::new(default_style()),
            children: Box::new(children),
            output: RefCell::new(output),
        });
        let weak = Rc::downgrade(&inner);
        let subscription = cx.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                inner.rebuild();
            }
        });
        Self {
            inner,
            _subscription: subscription,
        }
    }

    /// Replaces the container style.
    pub fn with_style(self, style: StyleMap) -> Self {
        *self.inner.style.borrow_mut() = style;
        self
    }

    pub fn key(&self) -> u64 {
        self.inner.key.get()
    }

    pub fn style(&self) -> StyleMap {
        self.inner.style.borrow().clone()
    }

    pub fn container(&self) -> Container {
        Container {
            key: self.key(),
            style: self.style(),
        }
    }

    pub fn output(&self) -> Ref<'_, T> {
        self.inner.output.borrow()
    }

    /// Rebuilds without waiting for a broadcast.
    pub fn rerender(&self) {
        self.inner.rebuild();
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for RerenderBoundary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RerenderBoundary")
            .field("key", &self.key())
            .field("style", &self.inner.style.borrow())
            .field("output", &self.inner.output.borrow())
            .finish()
    }
}

fn default_style() -> StyleMap {
    style! { flex: 1, width: "100%" }
}
