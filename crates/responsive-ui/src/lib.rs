//! Host-facing layer of the responsive engine.
//!
//! The UI library plugs in through [`ViewType`] and [`ViewHandle`]; in
//! return it gets [`Styled`] components whose mounted instances patch
//! themselves when the context broadcasts, a [`RerenderBoundary`] for
//! subtrees that simply rebuild, and a [`BreakpointWatcher`] for code that
//! branches on the active breakpoint.

pub mod boundary;
pub mod host;
pub mod props;
pub mod styled;
pub mod watch;


pub use boundary::{Container, RerenderBoundary};
pub use host::{ViewHandle, ViewType};
pub use props::{Props, StyleProps};
pub use styled::{Conditional, StyleSpec, Styled, StyledInstance};
pub use watch::BreakpointWatcher;
