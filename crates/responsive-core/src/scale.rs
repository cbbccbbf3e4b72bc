//! Linear scaling of size-like values.
//!
//! Between `minimum` and `maximum` viewport width a value is interpolated
//! from `value - factor * value / 2` up to `value + factor * value / 2`, so
//! the width halfway between both bounds leaves values untouched. Outside
//! the range the respective bound applies.

use std::rc::Rc;

use serde::Deserialize;

use crate::Orientation;

/// Replacement for the default calculator:
/// `(value, breakpoint, orientation) -> scaled value`.
pub type ValueFn = Rc<dyn Fn(f32, &str, Orientation) -> f32>;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ScaleConfig {
    pub minimum: f32,
    pub maximum: f32,
    pub factor: f32,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            minimum: 320.0,
            maximum: 520.0,
            factor: 0.5,
        }
    }
}

impl ScaleConfig {
    pub fn merge(&mut self, patch: ScalePatch) {
        if let Some(minimum) = patch.minimum {
            self.minimum = minimum;
        }
        if let Some(maximum) = patch.maximum {
            self.maximum = maximum;
        }
        if let Some(factor) = patch.factor {
            self.factor = factor;
        }
    }

    /// Scales `value` for a viewport of `width`. Zero stays zero and no other
    /// value is ever rounded onto zero or across it.
    pub fn scale(&self, value: f32, width: f32) -> f32 {
        if value == 0.0 {
            return 0.0;
        }

        let delta = self.factor * (value / 2.0);

        let scaled = if width <= self.minimum {
            round_half_up(value - delta)
        } else if width >= self.maximum {
            round_half_up(value + delta)
        } else {
            let percentage = (width - self.minimum) / (self.maximum - self.minimum);
            round_half_up(
                value - (self.factor / 2.0) * value + percentage * self.factor * value,
            )
        };

        avoid_zero(scaled, value)
    }
}

/// Partial scale configuration; present fields replace the current ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScalePatch {
    pub minimum: Option<f32>,
    pub maximum: Option<f32>,
    pub factor: Option<f32>,
}

impl ScalePatch {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn minimum(mut self, minimum: f32) -> Self {
        self.minimum = Some(minimum);
        self
    }
    pub fn maximum(mut self, maximum: f32) -> Self {
        self.maximum = Some(maximum);
        self
    }
    pub fn factor(mut self, factor: f32) -> Self {
        self.factor = Some(factor);
        self
    }
}

/// Keeps the magnitude of a scaled `value` at one or more, on the side of
/// zero that `input` was on.
pub fn avoid_zero(value: f32, input: f32) -> f32 {
    if input >= 0.0 {
        value.max(1.0)
    } else {
        value.min(-1.0)
    }
}

// Halves round towards positive infinity (-2.5 -> -2), unlike f32::round.
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(factor: f32) -> ScaleConfig {
        ScaleConfig {
            minimum: 320.0,
            maximum: 640.0,
            factor,
        }
    }

    #[test]
    fn test_scale_table() {
        // width, (factor 1, factor 0.5, factor 0)
        let cases = [
            (320.0, [5.0, 8.0, 10.0]),
            (640.0, [15.0, 13.0, 10.0]),
            (480.0, [10.0, 10.0, 10.0]),
            (400.0, [8.0, 9.0, 10.0]),
            (560.0, [13.0, 11.0, 10.0]),
        ];
        for (width, expected) in cases {
            for (factor, expected) in [1.0, 0.5, 0.0].into_iter().zip(expected) {
                assert_eq!(
                    config(factor).scale(10.0, width),
                    expected,
                    "width {width}, factor {factor}"
                );
            }
        }
    }

    #[test]
    fn test_zero_is_never_scaled() {
        for width in [0.0, 320.0, 400.0, 640.0, 2000.0] {
            assert_eq!(config(1.0).scale(0.0, width), 0.0);
        }
    }

    #[test]
    fn test_sign_is_preserved() {
        for factor in [0.0, 0.5, 1.0, 2.0, 3.0] {
            for width in [100.0, 320.0, 400.0, 480.0, 640.0, 1200.0] {
                for value in [-40.0, -3.0, -1.0, 0.4, 1.0, 2.0, 25.0] {
                    let scaled = config(factor).scale(value, width);
                    assert_ne!(scaled, 0.0, "{value} at {width} x{factor}");
                    assert_eq!(scaled.signum(), f32::signum(value));
                }
            }
        }
    }

    #[test]
    fn test_midpoint_is_identity() {
        for factor in [0.25, 0.5, 1.0, 1.5] {
            for value in [-12.0, 3.0, 10.0, 48.0] {
                assert_eq!(config(factor).scale(value, 480.0), value);
            }
        }
    }

    #[test]
    fn test_negative_halves_round_up() {
        // -5 at minimum with factor 1 → -2.5 → -2
        assert_eq!(config(1.0).scale(-5.0, 320.0), -2.0);
    }

    #[test]
    fn test_merge_is_partial() {
        let mut scale = ScaleConfig::default();
        scale.merge(ScalePatch::new().factor(1.0));
        assert_eq!(scale.minimum, 320.0);
        assert_eq!(scale.maximum, 520.0);
        assert_eq!(scale.factor, 1.0);
    }
}
