use std::collections::BTreeMap;

use responsive_core::{StyleMap, StyleValue};

/// Props as seen by [`Styled`](crate::Styled).
///
/// Conditional fragments are keyed by prop name and apply while
/// [`is_set`](Self::is_set) returns true for that name. A caller supplied
/// [`style`](Self::style) wins over everything the component computes.
pub trait StyleProps: 'static {
    fn is_set(&self, name: &str) -> bool;

    fn style(&self) -> Option<&StyleMap> {
        None
    }
}

/// General purpose props: boolean flags, free values and a caller style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    pub flags: BTreeMap<String, bool>,
    pub values: StyleMap,
    pub style: Option<StyleMap>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, name: impl Into<String>, on: bool) -> Self {
        self.flags.insert(name.into(), on);
        self
    }

    pub fn value(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.values.insert(name, value);
        self
    }

    pub fn style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        self.values.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f32> {
        self.values.number(name)
    }
}

impl StyleProps for Props {
    fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    fn style(&self) -> Option<&StyleMap> {
        self.style.as_ref()
    }
}

impl StyleProps for () {
    fn is_set(&self, _name: &str) -> bool {
        false
    }
}
