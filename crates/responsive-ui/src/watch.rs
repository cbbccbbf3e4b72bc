use std::cell::{Cell, RefCell};
use std::rc::Rc;

use responsive_core::{ActiveState, Responsive, Subscription};

struct Inner {
    cx: Responsive,
    state: RefCell<ActiveState>,
    renders: Cell<u64>,
    on_change: RefCell<Option<Rc<dyn Fn(&ActiveState)>>>,
}

impl Inner {
    fn refresh(&self) {
        let state = self.cx.state();
        *self.state.borrow_mut() = state.clone();
        self.renders.set(self.renders.get() + 1);
        let on_change = self.on_change.borrow().clone();
        if let Some(on_change) = on_change {
            on_change(&state);
        }
    }
}

/// Follows the active breakpoint of a context, for components that branch
/// on it directly instead of through styles.
///
/// Every broadcast counts as a change, even if the breakpoint stayed the
/// same, since orientation or width may have moved.
pub struct BreakpointWatcher {
    inner: Rc<Inner>,
    _subscription: Subscription,
}

impl BreakpointWatcher {
    pub fn new(cx: &Responsive) -> Self {
        let inner = Rc::new(Inner {
            cx: cx.clone(),
            state: RefCell::new(cx.state()),
            renders: Cell::new(0),
            on_change: RefCell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let subscription = cx.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                inner.refresh();
            }
        });
        Self {
            inner,
            _subscription: subscription,
        }
    }

    pub fn on_change(self, f: impl Fn(&ActiveState) + 'static) -> Self {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(f));
        self
    }

    pub fn breakpoint(&self) -> String {
        self.inner.state.borrow().breakpoint.clone()
    }

    pub fn state(&self) -> ActiveState {
        self.inner.state.borrow().clone()
    }

    /// Number of broadcasts seen so far.
    pub fn renders(&self) -> u64 {
        self.inner.renders.get()
    }

    /// Pins the breakpoint on the context, which broadcasts.
    pub fn set_breakpoint(&self, name: impl Into<String>) {
        self.inner.cx.set_breakpoint(name);
    }
}
