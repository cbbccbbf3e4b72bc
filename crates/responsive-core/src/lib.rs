//! # Responsive values
//!
//! `responsive-core` turns declared style values into concrete numbers and
//! strings for the current viewport, and tells interested parties when that
//! result may have changed.
//!
//! - [`Responsive`]: the engine context holding the viewport, breakpoint table, scale
//!   configuration, active breakpoint and the listener registry.
//! - [`StyleValue`] / [`StyleMap`]: raw style data, including adaptive
//!   shapes (breakpoint maps, `[portrait, landscape]` pairs, platform maps).
//! - [`StyleSheet`] / [`LazyStyle`]: sheets declared up front and resolved
//!   when read.
//! - [`Signal`] / [`Tracker`]: a small reactive core so computed styles can
//!   follow application state.
//!
//! ## Resolving values
//!
//! ```rust
//! use std::rc::Rc;
//! use responsive_core::*;
//!
//! let viewport = Rc::new(StaticViewport::new(400.0, 800.0));
//! let cx = Responsive::new(viewport.clone());
//! assert_eq!(cx.breakpoint(), "medium");
//!
//! let styles = cx.create_styles([(
//!     "card",
//!     style! {
//!         padding: style! { small: 10, large: 30 },
//!         backgroundColor: ["blue", "red"],
//!         flex: 1,
//!     },
//! )]);
//!
//! let card = styles.get("card").unwrap();
//! assert_eq!(card.number("padding"), Some(10.0)); // medium falls back to small
//! assert_eq!(card.text("backgroundColor").as_deref(), Some("blue"));
//!
//! viewport.set_size(1200.0, 800.0);
//! cx.viewport_changed();
//! assert_eq!(card.number("padding"), Some(30.0));
//! assert_eq!(card.text("backgroundColor").as_deref(), Some("red"));
//! ```
//!
//! ## Scaling
//!
//! Numbers of size-like properties (`margin`, `fontSize`, `borderWidth`,
//! ...) scale linearly with the window width between
//! [`ScaleConfig::minimum`] and [`ScaleConfig::maximum`]; halfway between
//! both they stay as declared. Other numbers such as `flex` never scale.
//!
//! ## Listening for changes
//!
//! [`Responsive::broadcast`] (triggered by [`Responsive::viewport_changed`]
//! and [`Responsive::set_breakpoint`]) recomputes the breakpoint and calls
//! every registered listener in order. Views either re-render and re-read
//! their lazy styles, or patch their already mounted handles; see
//! `responsive-ui`.

pub mod breakpoints;
pub mod config;
pub mod context;
pub mod dispose;
pub mod error;
pub mod prelude;
pub mod properties;
pub mod reactive;
pub mod resolve;
pub mod scale;
pub mod sheet;
pub mod signal;
pub mod tracking;
pub mod value;
pub mod viewport;

mod tests;

pub use breakpoints::*;
pub use config::*;
pub use context::*;
pub use dispose::*;
pub use error::{Diagnostic, Error};
pub use properties::is_scaleable;
pub use reactive::{batch, untracked};
pub use resolve::*;
pub use scale::*;
pub use sheet::*;
pub use signal::*;
pub use tracking::*;
pub use value::*;
pub use viewport::*;
