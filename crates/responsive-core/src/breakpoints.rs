//! Breakpoint table and breakpoint lookup.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use smallvec::SmallVec;

use crate::{Diagnostic, StyleMap, StyleValue};

/// Ordered `name → minimum width` table.
///
/// Entries keep the order they were declared in; that order is the
/// breakpoint rank used for fallbacks. Thresholds are expected to ascend but
/// this is not checked. A table always holds at least one entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints {
    entries: SmallVec<[(String, f32); 4]>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            entries: SmallVec::from_vec(vec![
                ("small".to_string(), 360.0),
                ("medium".to_string(), 420.0),
                ("large".to_string(), 999.0),
            ]),
        }
    }
}

impl Breakpoints {
    /// Builds a table from `(name, threshold)` pairs. An empty input falls
    /// back to the default table.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f32)>,
        K: Into<String>,
    {
        let entries: SmallVec<[(String, f32); 4]> = entries
            .into_iter()
            .map(|(name, threshold)| (name.into(), threshold))
            .collect();
        if entries.is_empty() {
            Diagnostic::EmptyBreakpoints.report();
            return Self::default();
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(name, t)| (name.as_str(), *t))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn first(&self) -> &str {
        self.entries.first().map_or("", |(name, _)| name.as_str())
    }

    pub fn last(&self) -> &str {
        self.entries.last().map_or("", |(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rank(name).is_some()
    }

    /// Position of `name` in declaration order.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Breakpoint for a viewport `width`: the first entry whose threshold is
    /// at least `width`, or the last entry once the width exceeds them all.
    pub fn active_for(&self, width: f32) -> &str {
        self.entries
            .iter()
            .find(|(_, threshold)| *threshold >= width)
            .map_or_else(|| self.last(), |(name, _)| name.as_str())
    }

    /// Whether any key of `map` names a breakpoint of this table.
    pub fn matches_any(&self, map: &StyleMap) -> bool {
        map.keys().any(|key| self.contains(key))
    }

    /// Value of a breakpoint-keyed map for the `active` breakpoint.
    ///
    /// Walks from `active` down to the smallest breakpoint and returns the
    /// first entry present. Higher breakpoints are never consulted. When
    /// `active` is not part of the table only an exact key matches.
    pub fn nearest<'m>(&self, map: &'m StyleMap, active: &str) -> Option<&'m StyleValue> {
        let Some(rank) = self.rank(active) else {
            return map.get(active);
        };
        self.entries[..=rank]
            .iter()
            .rev()
            .find_map(|(name, _)| map.get(name))
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for Breakpoints {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// Hand-written so the table keeps the order of the source document.
impl<'de> Deserialize<'de> for Breakpoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = Breakpoints;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of breakpoint names to minimum widths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, threshold)) = access.next_entry::<String, f32>()? {
                    entries.push((name, threshold));
                }
                Ok(Breakpoints::new(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
