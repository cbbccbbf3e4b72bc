use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Run-once cleanup handle.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl fmt::Debug for Dispose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispose")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Keeps a registration alive; disposes it when dropped.
#[must_use = "dropping a Subscription cancels it immediately"]
#[derive(Debug)]
pub struct Subscription {
    dispose: Dispose,
}

impl Subscription {
    pub fn new(dispose: Dispose) -> Self {
        Self { dispose }
    }

    pub fn is_active(&self) -> bool {
        !self.dispose.is_disposed()
    }

    /// Cancels now instead of at drop.
    pub fn cancel(self) {
        self.dispose.run();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose.run();
    }
}
