//! What the engine needs from a UI library.

use std::rc::Rc;

use responsive_core::StyleMap;

use crate::StyleProps;

/// A mounted native view that can take a new style without re-rendering.
pub trait ViewHandle {
    fn apply_style(&self, style: &StyleMap);
}

impl<H: ViewHandle + ?Sized> ViewHandle for Rc<H> {
    fn apply_style(&self, style: &StyleMap) {
        (**self).apply_style(style)
    }
}

/// A kind of view that [`Styled`](crate::Styled) can bind styles to.
pub trait ViewType: 'static {
    type Props: StyleProps;
    type Handle: ViewHandle + 'static;

    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the host can render this view at all.
    fn is_valid(&self) -> bool {
        true
    }

    /// Creates the native view with its first resolved style.
    fn mount(&self, props: &Self::Props, style: &StyleMap) -> Self::Handle;

    /// Full re-render after the props changed.
    fn render(&self, handle: &Self::Handle, props: &Self::Props, style: &StyleMap);
}
