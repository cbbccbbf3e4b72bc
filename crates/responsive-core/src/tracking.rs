//! Dependency tracking used by computed styles.
//!
//! The engine only needs one capability from a reactive state library: run
//! a computation now and again whenever anything it read changes. Any
//! library can provide it by implementing [`Tracker`]; [`SignalTracker`]
//! does so for this crate's [`Signal`](crate::Signal).

use std::rc::Rc;

use crate::{Dispose, reactive};

pub trait Tracker {
    /// Runs `computation` immediately and re-runs it whenever one of the
    /// dependencies read during its last run changes, until the returned
    /// handle is disposed.
    fn track(&self, computation: Rc<dyn Fn()>) -> Dispose;
}

impl<T: Tracker + ?Sized> Tracker for Rc<T> {
    fn track(&self, computation: Rc<dyn Fn()>) -> Dispose {
        (**self).track(computation)
    }
}

/// [`Tracker`] backed by the thread-local signal graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalTracker;

impl Tracker for SignalTracker {
    fn track(&self, computation: Rc<dyn Fn()>) -> Dispose {
        let id = reactive::new_observer(move || computation());
        reactive::run_observer_now(id);
        Dispose::new(move || reactive::remove_observer(id))
    }
}
