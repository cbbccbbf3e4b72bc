//! Thread-local dependency graph behind [`Signal`](crate::Signal).
//!
//! An observer is a closure run "under tracking": every signal it reads
//! while running becomes one of its dependencies, and a later write to any
//! of them runs it again. Dependencies are collected afresh on every run.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

pub type SignalId = usize;
pub type ObserverId = usize;

thread_local! {
    static CURRENT_OBSERVER: RefCell<Option<ObserverId>> = const { RefCell::new(None) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
    static BATCH: RefCell<Option<Vec<SignalId>>> = const { RefCell::new(None) };
}

#[derive(Default)]
struct DepGraph {
    next_observer: ObserverId,
    // signal_id -> observers that depend on it, in creation order
    edges: HashMap<SignalId, BTreeSet<ObserverId>>,
    // observer_id -> signals it depends on
    back: HashMap<ObserverId, HashSet<SignalId>>,
    observers: HashMap<ObserverId, Rc<dyn Fn()>>,
    running: HashSet<ObserverId>,
}

impl DepGraph {
    fn remove_all_edges_for(&mut self, obs: ObserverId) {
        if let Some(signals) = self.back.remove(&obs) {
            for s in signals {
                if let Some(set) = self.edges.get_mut(&s) {
                    set.remove(&obs);
                }
            }
        }
    }

    fn remove_observer(&mut self, obs: ObserverId) {
        self.observers.remove(&obs);
        self.remove_all_edges_for(obs);
        self.running.remove(&obs);
    }
}

pub fn register_signal_read(sig: SignalId) {
    CURRENT_OBSERVER.with(|co| {
        if let Some(obs) = *co.borrow() {
            GRAPH.with(|g| {
                let mut g = g.borrow_mut();
                g.edges.entry(sig).or_default().insert(obs);
                g.back.entry(obs).or_default().insert(sig);
            });
        }
    });
}

/// Re-runs every observer of `sig`, or queues it inside [`batch`].
pub fn signal_changed(sig: SignalId) {
    let queued = BATCH.with(|b| match b.borrow_mut().as_mut() {
        Some(pending) => {
            if !pending.contains(&sig) {
                pending.push(sig);
            }
            true
        }
        None => false,
    });
    if !queued {
        propagate(&[sig]);
    }
}

/// Defers change propagation until `f` returns; an observer depending on
/// several written signals then runs once.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    // Clears the pending list if `f` unwinds.
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            BATCH.with(|b| b.borrow_mut().take());
        }
    }

    let outermost = BATCH.with(|b| {
        let mut b = b.borrow_mut();
        if b.is_some() {
            false
        } else {
            *b = Some(Vec::new());
            true
        }
    });
    if !outermost {
        return f();
    }

    let guard = Guard;
    let result = f();
    let pending = BATCH.with(|b| b.borrow_mut().take()).unwrap_or_default();
    drop(guard);
    propagate(&pending);
    result
}

fn propagate(signals: &[SignalId]) {
    let observers: BTreeSet<ObserverId> = GRAPH.with(|g| {
        let g = g.borrow();
        signals
            .iter()
            .filter_map(|s| g.edges.get(s))
            .flatten()
            .copied()
            .collect()
    });

    for obs in observers {
        let skip = GRAPH.with(|g| {
            let mut g = g.borrow_mut();
            // removed while an earlier observer ran, or already on the stack
            if !g.observers.contains_key(&obs) || g.running.contains(&obs) {
                return true;
            }
            g.running.insert(obs);
            false
        });
        if skip {
            continue;
        }
        run_tracked(obs);
        GRAPH.with(|g| g.borrow_mut().running.remove(&obs));
    }
}

pub fn new_observer(f: impl Fn() + 'static) -> ObserverId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let id = g.next_observer;
        g.next_observer += 1;
        g.observers.insert(id, Rc::new(f));
        id
    })
}

/// Remove an observer and all of its dependency edges.
pub fn remove_observer(id: ObserverId) {
    GRAPH.with(|g| g.borrow_mut().remove_observer(id));
}

pub fn run_observer_now(id: ObserverId) {
    run_tracked(id);
}

fn run_tracked(id: ObserverId) {
    let f = GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        g.remove_all_edges_for(id);
        g.observers.get(&id).cloned()
    });
    let Some(f) = f else {
        return;
    };

    // Restores the previous observer on unwind as well.
    struct Restore(Option<ObserverId>);
    impl Drop for Restore {
        fn drop(&mut self) {
            CURRENT_OBSERVER.with(|co| *co.borrow_mut() = self.0);
        }
    }

    let prev = CURRENT_OBSERVER.with(|co| co.borrow_mut().replace(id));
    let _restore = Restore(prev);
    f();
}

/// Runs `f` without recording signal reads for the current observer.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    struct Restore(Option<ObserverId>);
    impl Drop for Restore {
        fn drop(&mut self) {
            CURRENT_OBSERVER.with(|co| *co.borrow_mut() = self.0);
        }
    }

    let prev = CURRENT_OBSERVER.with(|co| co.borrow_mut().take());
    let _restore = Restore(prev);
    f()
}
