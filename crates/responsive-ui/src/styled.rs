//! Style bound to a view type.
//!
//! A [`Styled`] pairs a view type with a style declaration. Mounting it
//! yields a [`StyledInstance`] that keeps its native view in sync with the
//! responsive context: on every broadcast the style is recomputed from the
//! instance's current props and pushed to the view with
//! [`ViewHandle::apply_style`], without a re-render. Prop changes go
//! through [`StyledInstance::set_props`] and do re-render.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use responsive_core::{Diagnostic, Responsive, StyleMap, Subscription, Tracker};

use crate::{StyleProps, ViewHandle, ViewType};

/// Style fragments keyed by breakpoint, platform or boolean prop name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conditional {
    fragments: Vec<(String, StyleMap)>,
}

impl Conditional {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fragment. A repeated key replaces the earlier fragment but
    /// keeps its position.
    pub fn when(mut self, key: impl Into<String>, fragment: StyleMap) -> Self {
        let key = key.into();
        match self.fragments.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = fragment,
            None => self.fragments.push((key, fragment)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleMap> {
        self.fragments
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, fragment)| fragment)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleMap)> {
        self.fragments.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Base style of a [`Styled`]: fixed, or computed from props.
pub enum StyleSpec<P> {
    Static(Rc<StyleMap>),
    Computed(Rc<dyn Fn(&P) -> StyleMap>),
}

impl<P> Clone for StyleSpec<P> {
    fn clone(&self) -> Self {
        match self {
            StyleSpec::Static(map) => StyleSpec::Static(map.clone()),
            StyleSpec::Computed(f) => StyleSpec::Computed(f.clone()),
        }
    }
}

impl<P> StyleSpec<P> {
    pub fn is_computed(&self) -> bool {
        matches!(self, StyleSpec::Computed(_))
    }

    fn base(&self, props: &P) -> StyleMap {
        match self {
            StyleSpec::Static(map) => (**map).clone(),
            StyleSpec::Computed(f) => f(props),
        }
    }
}

enum Fragments<P> {
    Static(Rc<Conditional>),
    Computed(Rc<dyn Fn(&P) -> Conditional>),
}

impl<P> Clone for Fragments<P> {
    fn clone(&self) -> Self {
        match self {
            Fragments::Static(c) => Fragments::Static(c.clone()),
            Fragments::Computed(f) => Fragments::Computed(f.clone()),
        }
    }
}

impl<P> Fragments<P> {
    fn get(&self, props: &P) -> Rc<Conditional> {
        match self {
            Fragments::Static(c) => c.clone(),
            Fragments::Computed(f) => Rc::new(f(props)),
        }
    }
}

pub struct Styled<V: ViewType> {
    cx: Responsive,
    view: Rc<V>,
    spec: StyleSpec<V::Props>,
    fragments: Option<Fragments<V::Props>>,
    tracker: Option<Rc<dyn Tracker>>,
    warned: Rc<Cell<bool>>,
}

impl<V: ViewType> Clone for Styled<V> {
    fn clone(&self) -> Self {
        Self {
            cx: self.cx.clone(),
            view: self.view.clone(),
            spec: self.spec.clone(),
            fragments: self.fragments.clone(),
            tracker: self.tracker.clone(),
            warned: self.warned.clone(),
        }
    }
}

impl<V: ViewType> Styled<V> {
    pub fn new(cx: &Responsive, view: V, base: StyleMap) -> Self {
        Self::with_spec(cx, view, StyleSpec::Static(Rc::new(base)))
    }

    /// Style computed from the props of each instance.
    pub fn computed(
        cx: &Responsive,
        view: V,
        f: impl Fn(&V::Props) -> StyleMap + 'static,
    ) -> Self {
        Self::with_spec(cx, view, StyleSpec::Computed(Rc::new(f)))
    }

    pub fn with_spec(cx: &Responsive, view: V, spec: StyleSpec<V::Props>) -> Self {
        if !view.is_valid() {
            Diagnostic::InvalidViewType {
                view: view.name().to_string(),
            }
            .report();
        }
        Self {
            cx: cx.clone(),
            view: Rc::new(view),
            spec,
            fragments: None,
            tracker: None,
            warned: Rc::new(Cell::new(false)),
        }
    }

    pub fn conditional(mut self, fragments: Conditional) -> Self {
        self.fragments = Some(Fragments::Static(Rc::new(fragments)));
        self
    }

    pub fn conditional_fn(mut self, f: impl Fn(&V::Props) -> Conditional + 'static) -> Self {
        self.fragments = Some(Fragments::Computed(Rc::new(f)));
        self
    }

    /// Lets computed styles follow state read while computing them.
    pub fn with_tracker(mut self, tracker: impl Tracker + 'static) -> Self {
        self.tracker = Some(Rc::new(tracker));
        self
    }

    pub fn context(&self) -> &Responsive {
        &self.cx
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_computed(&self) -> bool {
        self.spec.is_computed() || matches!(self.fragments, Some(Fragments::Computed(_)))
    }

    /// Merges base and matching fragments, resolves the result against the
    /// current state and overlays the caller's style.
    pub fn style_for(&self, props: &V::Props) -> StyleMap {
        let mut merged = self.spec.base(props);

        if let Some(fragments) = &self.fragments {
            let fragments = fragments.get(props);
            let breakpoint = self.cx.breakpoint();
            if let Some(fragment) = fragments.get(&breakpoint) {
                merged.overlay(fragment);
            }
            if let Some(fragment) = fragments.get(self.cx.platform().key()) {
                merged.overlay(fragment);
            }
            for (key, fragment) in fragments.iter() {
                if props.is_set(key) {
                    merged.overlay(fragment);
                }
            }
        }

        let mut style = self.cx.resolve_map(&merged);
        if let Some(caller) = props.style() {
            style.overlay(caller);
        }
        style
    }

    pub fn mount(&self, props: V::Props) -> StyledInstance<V> {
        if self.is_computed() && self.tracker.is_none() && !self.warned.replace(true) {
            Diagnostic::MissingTracker {
                view: self.view.name().to_string(),
            }
            .report();
        }

        let style = self.style_for(&props);
        let handle = self.view.mount(&props, &style);
        let inner = Rc::new(InstanceInner {
            styled: self.clone(),
            props: RefCell::new(props),
            handle,
            last_style: RefCell::new(style),
            tracking: RefCell::new(None),
        });
        if inner.is_tracked() {
            inner.refresh(Apply::Collect);
        }

        let weak = Rc::downgrade(&inner);
        let listener = self.cx.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                inner.refresh(Apply::Patch);
            }
        });

        StyledInstance {
            inner,
            _listener: listener,
        }
    }
}

impl<V: ViewType> fmt::Debug for Styled<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Styled")
            .field("view", &self.view.name())
            .field("computed", &self.is_computed())
            .field("tracker", &self.tracker.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Apply {
    // dependencies only, the view already shows this style
    Collect,
    Patch,
    Render,
}

struct InstanceInner<V: ViewType> {
    styled: Styled<V>,
    props: RefCell<V::Props>,
    handle: V::Handle,
    last_style: RefCell<StyleMap>,
    tracking: RefCell<Option<Subscription>>,
}

impl<V: ViewType> InstanceInner<V> {
    fn is_tracked(&self) -> bool {
        self.styled.tracker.is_some() && self.styled.is_computed()
    }

    /// Recomputes the style and hands it to the view. Tracked instances
    /// restart tracking here so the dependencies always match what the
    /// latest props and breakpoint made the style functions read.
    fn refresh(self: &Rc<Self>, apply: Apply) {
        let Some(tracker) = self.styled.tracker.clone().filter(|_| self.is_tracked()) else {
            self.apply(apply);
            return;
        };

        let previous = self.tracking.borrow_mut().take();
        drop(previous);

        let weak = Rc::downgrade(self);
        let pending = Cell::new(Some(apply));
        let dispose = tracker.track(Rc::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.apply(pending.take().unwrap_or(Apply::Patch));
        }));
        *self.tracking.borrow_mut() = Some(Subscription::new(dispose));
    }

    fn apply(&self, apply: Apply) {
        let style = {
            let props = self.props.borrow();
            self.styled.style_for(&props)
        };
        match apply {
            Apply::Collect => {}
            Apply::Patch => {
                log::trace!("patching `{}`", self.styled.view.name());
                self.handle.apply_style(&style);
            }
            Apply::Render => {
                self.styled
                    .view
                    .render(&self.handle, &self.props.borrow(), &style);
            }
        }
        *self.last_style.borrow_mut() = style;
    }
}

/// A mounted [`Styled`]. Dropping it detaches the view from the context.
pub struct StyledInstance<V: ViewType> {
    inner: Rc<InstanceInner<V>>,
    _listener: Subscription,
}

impl<V: ViewType> StyledInstance<V> {
    /// Replaces the props and re-renders with a freshly computed style.
    pub fn set_props(&self, props: V::Props) {
        *self.inner.props.borrow_mut() = props;
        self.inner.refresh(Apply::Render);
    }

    pub fn rerender(&self) {
        self.inner.refresh(Apply::Render);
    }

    pub fn handle(&self) -> &V::Handle {
        &self.inner.handle
    }

    pub fn props(&self) -> Ref<'_, V::Props> {
        self.inner.props.borrow()
    }

    /// Style most recently rendered or patched.
    pub fn last_style(&self) -> StyleMap {
        self.inner.last_style.borrow().clone()
    }

    pub fn unmount(self) {}
}

impl<V: ViewType> fmt::Debug for StyledInstance<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyledInstance")
            .field("view", &self.inner.styled.view.name())
            .field("last_style", &self.inner.last_style.borrow())
            .finish()
    }
}
