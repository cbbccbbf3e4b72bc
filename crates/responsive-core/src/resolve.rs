//! Adaptive value resolution.

use crate::properties::{TRANSFORM_PROPERTY, is_scaleable};
use crate::viewport::{DEFAULT_PLATFORM_KEY, PLATFORM_KEYS};
use crate::{Breakpoints, Orientation, Platform, ScaleConfig, StyleMap, StyleValue, ValueFn};

/// Snapshot of the responsive state that values are resolved against.
///
/// Obtained from [`Responsive::resolver`](crate::Responsive::resolver). It
/// owns its data, so custom value functions may call back into the context
/// while a resolution is running.
#[derive(Clone)]
pub struct Resolver {
    pub(crate) breakpoints: Breakpoints,
    pub(crate) breakpoint: String,
    pub(crate) orientation: Orientation,
    pub(crate) platform: Platform,
    pub(crate) width: f32,
    pub(crate) scale: ScaleConfig,
    pub(crate) value: Option<ValueFn>,
}

impl Resolver {
    pub fn breakpoint(&self) -> &str {
        &self.breakpoint
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Runs the scale calculator (default or custom) on `value`.
    pub fn scale(&self, value: f32) -> f32 {
        match &self.value {
            Some(f) => f(value, &self.breakpoint, self.orientation),
            None => self.scale.scale(value, self.width),
        }
    }

    /// Resolves `raw` for `property` into a concrete value. `None` means the
    /// value does not apply right now (no breakpoint at or below the active
    /// one, or no entry for this platform).
    pub fn resolve(&self, property: &str, raw: &StyleValue) -> Option<StyleValue> {
        self.resolve_value(property, raw, true)
    }

    /// Resolves every entry of `map`, dropping the ones that don't apply.
    pub fn resolve_map(&self, map: &StyleMap) -> StyleMap {
        self.resolve_entries(map, true)
    }

    /// Whether `map` is a breakpoint map or a platform map rather than a
    /// nested style object.
    pub fn is_adaptive(&self, map: &StyleMap) -> bool {
        self.breakpoints.matches_any(map) || is_platform_map(map)
    }

    // Numbers picked from a breakpoint map or orientation pair are per-tier
    // literals and are not scaled again.
    fn resolve_value(&self, property: &str, raw: &StyleValue, scaled: bool) -> Option<StyleValue> {
        match raw {
            StyleValue::Text(_) => Some(raw.clone()),
            StyleValue::Number(n) if scaled && is_scaleable(property) => {
                Some(StyleValue::Number(self.scale(*n)))
            }
            StyleValue::Number(_) => Some(raw.clone()),
            StyleValue::List(items) if items.len() == 2 && property != TRANSFORM_PROPERTY => {
                let selected = items.get(self.orientation.index())?;
                self.resolve_value(property, selected, false)
            }
            StyleValue::Map(map) if self.breakpoints.matches_any(map) => {
                let selected = self.breakpoints.nearest(map, &self.breakpoint)?;
                self.resolve_value(property, selected, false)
            }
            StyleValue::Map(map) if is_platform_map(map) => {
                let selected = map
                    .get(self.platform.key())
                    .or_else(|| map.get(DEFAULT_PLATFORM_KEY))?;
                self.resolve_value(property, selected, scaled)
            }
            StyleValue::Map(map) if property != TRANSFORM_PROPERTY => {
                Some(StyleValue::Map(self.resolve_entries(map, scaled)))
            }
            _ => Some(raw.clone()),
        }
    }

    fn resolve_entries(&self, map: &StyleMap, scaled: bool) -> StyleMap {
        map.iter()
            .filter_map(|(key, value)| {
                self.resolve_value(key, value, scaled)
                    .map(|resolved| (key, resolved))
            })
            .collect()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("breakpoints", &self.breakpoints)
            .field("breakpoint", &self.breakpoint)
            .field("orientation", &self.orientation)
            .field("platform", &self.platform)
            .field("width", &self.width)
            .field("scale", &self.scale)
            .field("value", &self.value.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

fn is_platform_map(map: &StyleMap) -> bool {
    PLATFORM_KEYS.iter().any(|key| map.contains_key(key))
}
