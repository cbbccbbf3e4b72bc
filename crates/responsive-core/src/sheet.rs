//! Style sheets whose values are resolved when they are read.
//!
//! Sheets are usually declared once, long before the viewport is known. A
//! [`LazyStyle`] therefore keeps the raw declaration and runs it through the
//! resolver on every access, so each render sees the current breakpoint,
//! orientation and width.

use std::collections::BTreeMap;

use crate::error::json_kind;
use crate::{Diagnostic, Error, Responsive, StyleMap, StyleValue};

#[derive(Clone, Debug)]
pub struct StyleSheet {
    cx: Responsive,
    entries: BTreeMap<String, StyleMap>,
}

impl StyleSheet {
    pub(crate) fn new<I, K>(cx: Responsive, sheet: I) -> Self
    where
        I: IntoIterator<Item = (K, StyleMap)>,
        K: Into<String>,
    {
        Self {
            cx,
            entries: sheet.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Parses a sheet from JSON text. Malformed JSON is an error; a sheet
    /// or block of the wrong shape is reported and skipped.
    pub fn from_json(cx: &Responsive, json: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_value(cx, &value))
    }

    pub fn from_value(cx: &Responsive, value: &serde_json::Value) -> Self {
        let Some(object) = value.as_object() else {
            Diagnostic::InvalidSheet {
                found: json_kind(value),
            }
            .report();
            return Self::new(cx.clone(), Vec::<(String, StyleMap)>::new());
        };

        let mut entries = Vec::with_capacity(object.len());
        for (key, block) in object {
            match StyleValue::from_json(block) {
                Some(StyleValue::Map(map)) => entries.push((key.clone(), map)),
                _ => Diagnostic::InvalidSheetEntry {
                    key: key.clone(),
                    found: json_kind(block),
                }
                .report(),
            }
        }
        Self::new(cx.clone(), entries)
    }

    pub fn get(&self, name: &str) -> Option<LazyStyle<'_>> {
        self.entries.get(name).map(|raw| LazyStyle { cx: &self.cx, raw })
    }

    /// Resolves the whole block `name` against the current state.
    pub fn resolve(&self, name: &str) -> Option<StyleMap> {
        self.get(name).map(|style| style.resolve())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-time view over one raw style block.
#[derive(Clone, Copy, Debug)]
pub struct LazyStyle<'a> {
    cx: &'a Responsive,
    raw: &'a StyleMap,
}

impl<'a> LazyStyle<'a> {
    pub fn new(cx: &'a Responsive, raw: &'a StyleMap) -> Self {
        Self { cx, raw }
    }

    /// Current value of `property`, or `None` if it is unset or doesn't
    /// apply right now.
    pub fn get(&self, property: &str) -> Option<StyleValue> {
        self.cx.resolve(property, self.raw.get(property)?)
    }

    pub fn number(&self, property: &str) -> Option<f32> {
        self.get(property).as_ref().and_then(StyleValue::as_number)
    }

    pub fn text(&self, property: &str) -> Option<String> {
        match self.get(property)? {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lazy view over a nested object such as `shadowOffset`. Adaptive
    /// maps (breakpoint or platform keyed) are values, not objects, and
    /// yield `None`; read them with [`get`](Self::get).
    pub fn view(&self, property: &str) -> Option<LazyStyle<'a>> {
        let nested = self.raw.get(property)?.as_map()?;
        if self.cx.resolver().is_adaptive(nested) {
            return None;
        }
        Some(LazyStyle {
            cx: self.cx,
            raw: nested,
        })
    }

    pub fn raw(&self) -> &'a StyleMap {
        self.raw
    }

    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.raw.keys()
    }

    /// Resolves every property now.
    pub fn resolve(&self) -> StyleMap {
        self.cx.resolve_map(self.raw)
    }
}
