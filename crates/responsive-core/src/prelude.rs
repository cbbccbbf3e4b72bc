pub use crate::breakpoints::Breakpoints;
pub use crate::config::Config;
pub use crate::context::{ActiveState, ListenerId, Responsive};
pub use crate::dispose::{Dispose, Subscription};
pub use crate::reactive::batch;
pub use crate::scale::{ScaleConfig, ScalePatch};
pub use crate::sheet::{LazyStyle, StyleSheet};
pub use crate::signal::{Signal, signal};
pub use crate::style;
pub use crate::tracking::{SignalTracker, Tracker};
pub use crate::value::{StyleMap, StyleValue};
pub use crate::viewport::{Orientation, Platform, Size, StaticViewport, Viewport};
