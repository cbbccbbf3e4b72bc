use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::{Breakpoints, Error, Orientation, ScalePatch, ValueFn};

/// Options accepted by [`Responsive::configure`](crate::Responsive::configure).
///
/// Everything but `value` can also be read from JSON:
///
/// ```rust
/// use responsive_core::Config;
///
/// let config = Config::from_json(r#"{
///     "breakpoints": { "tiny": 300, "huge": 999 },
///     "scale": { "factor": 1 }
/// }"#)?;
/// assert_eq!(config.scale.and_then(|s| s.factor), Some(1.0));
/// # Ok::<(), responsive_core::Error>(())
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replaces the breakpoint table.
    pub breakpoints: Option<Breakpoints>,
    /// Pins the active breakpoint.
    pub breakpoint: Option<String>,
    /// Merged into the current scale configuration.
    pub scale: Option<ScalePatch>,
    /// Replaces the scale calculator.
    #[serde(skip)]
    pub value: Option<ValueFn>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn breakpoints<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        self.breakpoints = Some(Breakpoints::new(entries));
        self
    }

    pub fn breakpoint(mut self, name: impl Into<String>) -> Self {
        self.breakpoint = Some(name.into());
        self
    }

    pub fn scale(mut self, patch: ScalePatch) -> Self {
        self.scale = Some(patch);
        self
    }

    pub fn value(mut self, f: impl Fn(f32, &str, Orientation) -> f32 + 'static) -> Self {
        self.value = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("breakpoints", &self.breakpoints)
            .field("breakpoint", &self.breakpoint)
            .field("scale", &self.scale)
            .field("value", &self.value.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
