//! Raw and resolved style values.
//!
//! A [`StyleValue`] is what an author writes for a style property. Besides
//! plain scalars it can carry adaptive data:
//!
//! - `[portrait, landscape]`: a two element [`StyleValue::List`].
//! - `{ small: .., large: .. }`: a [`StyleValue::Map`] keyed by breakpoint.
//! - `{ ios: .., android: .. }`: a [`StyleValue::Map`] keyed by platform.
//!
//! These shapes nest freely. Which interpretation applies is decided by the
//! resolver from the property name and the configured breakpoints, never by
//! the shape alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f32),
    Text(String),
    List(Vec<StyleValue>),
    Map(StyleMap),
}

impl StyleValue {
    /// Orientation pair: index 0 applies in portrait, index 1 in landscape.
    pub fn pair(portrait: impl Into<StyleValue>, landscape: impl Into<StyleValue>) -> Self {
        StyleValue::List(vec![portrait.into(), landscape.into()])
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&StyleMap> {
        match self {
            StyleValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Converts loosely typed JSON. `null` has no style meaning and yields
    /// `None`; nulls nested in arrays or objects are dropped.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(StyleValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(|n| StyleValue::Number(n as f32)),
            Value::String(s) => Some(StyleValue::Text(s.clone())),
            Value::Array(items) => Some(StyleValue::List(
                items.iter().filter_map(StyleValue::from_json).collect(),
            )),
            Value::Object(map) => Some(StyleValue::Map(
                map.iter()
                    .filter_map(|(k, v)| StyleValue::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }
}

impl From<f32> for StyleValue {
    fn from(v: f32) -> Self {
        StyleValue::Number(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v as f32)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        StyleValue::Number(v as f32)
    }
}

impl From<u32> for StyleValue {
    fn from(v: u32) -> Self {
        StyleValue::Number(v as f32)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        StyleValue::Bool(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        StyleValue::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        StyleValue::Text(v)
    }
}

impl From<StyleMap> for StyleValue {
    fn from(v: StyleMap) -> Self {
        StyleValue::Map(v)
    }
}

impl From<Vec<StyleValue>> for StyleValue {
    fn from(v: Vec<StyleValue>) -> Self {
        StyleValue::List(v)
    }
}

impl<T: Into<StyleValue>> From<[T; 2]> for StyleValue {
    fn from([portrait, landscape]: [T; 2]) -> Self {
        StyleValue::pair(portrait, landscape)
    }
}

/// Property name → value mapping used for style blocks, nested objects and
/// adaptive maps alike.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(StyleValue::as_number)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StyleValue::as_text)
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: every entry of `other` replaces the same key here.
    pub fn overlay(&mut self, other: &StyleMap) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }
}

impl<K: Into<String>> FromIterator<(K, StyleValue)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, StyleValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for StyleMap {
    type Item = (String, StyleValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds a [`StyleMap`]. Keys are identifiers or string literals; values
/// are anything convertible into a [`StyleValue`], including nested
/// `style! { .. }` blocks and `[portrait, landscape]` arrays.
///
/// ```rust
/// use responsive_core::style;
///
/// let card = style! {
///     padding: style! { small: 10, large: 30 },
///     backgroundColor: ["blue", "red"],
///     flex: 1,
/// };
/// assert_eq!(card.len(), 3);
/// ```
#[macro_export]
macro_rules! style {
    () => {
        $crate::StyleMap::new()
    };
    ($($key:tt : $value:expr),+ $(,)?) => {{
        let mut map = $crate::StyleMap::new();
        $( map.insert($crate::__style_key!($key), $value); )+
        map
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __style_key {
    ($key:ident) => {
        stringify!($key)
    };
    ($key:literal) => {
        $key
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_macro_nesting() {
        let s = crate::style! {
            shadowOffset: crate::style! { width: 5, height: 5 },
            "borderColor": ["blue", "red"],
            opacity: 0.5,
        };
        assert_eq!(
            s.get("shadowOffset").and_then(StyleValue::as_map).and_then(|m| m.number("width")),
            Some(5.0)
        );
        assert_eq!(
            s.get("borderColor"),
            Some(&StyleValue::pair("blue", "red"))
        );
        assert_eq!(s.number("opacity"), Some(0.5));
    }

    #[test]
    fn test_overlay_replaces_keys() {
        let mut base = crate::style! { color: "green", width: 40 };
        base.overlay(&crate::style! { color: "red" });
        assert_eq!(base.text("color"), Some("red"));
        assert_eq!(base.number("width"), Some(40.0));
    }

    #[test]
    fn test_from_json_drops_nulls() {
        let json = serde_json::json!({
            "margin": 10,
            "color": null,
            "padding": [4, null, 8],
        });
        let value = StyleValue::from_json(&json);
        let map = value.as_ref().and_then(StyleValue::as_map);
        assert_eq!(map.map(StyleMap::len), Some(2));
        assert_eq!(
            map.and_then(|m| m.get("padding")),
            Some(&StyleValue::pair(4, 8))
        );
    }
}
