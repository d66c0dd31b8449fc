//! Dotted payload paths.
//!
//! A condition's path (e.g. `"source.owner"`) is split into segments once,
//! when the condition is built or deserialized, and resolution is a walk
//! over those segments only. Resolution never fails: a missing key at any
//! step yields `None`, the "undefined" value.
//!
//! Objects are walked by key. Arrays answer canonical decimal indices and
//! `length`. Strings, numbers, booleans and null have no members.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use super::event::Payload;

/// A compiled dotted path into an event payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PayloadPath {
    segments: SmallVec<[String; 4]>,
}

impl PayloadPath {
    /// Compile a dotted path.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path.split('.').map(str::to_string).collect(),
        }
    }

    /// The path's segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if the path is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_empty()
    }

    /// Resolve against a payload. `None` means undefined.
    ///
    /// Borrowed for values found in the payload; owned only for computed
    /// members such as an array's `length`.
    #[must_use]
    pub fn resolve<'a>(&self, payload: &'a Payload) -> Option<Cow<'a, Value>> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = Cow::Borrowed(payload.get(first)?);
        for segment in rest {
            current = match current {
                Cow::Borrowed(value) => step(value, segment)?,
                // Computed members are numbers and have no members of their own.
                Cow::Owned(_) => return None,
            };
        }
        Some(current)
    }
}

/// Descend one level.
fn step<'a>(value: &'a Value, segment: &str) -> Option<Cow<'a, Value>> {
    match value {
        Value::Object(map) => map.get(segment).map(Cow::Borrowed),
        Value::Array(items) if segment == "length" => Some(Cow::Owned(Value::from(items.len()))),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)).map(Cow::Borrowed),
        _ => None,
    }
}

fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

impl From<String> for PayloadPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&str> for PayloadPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PayloadPath> for String {
    fn from(path: PayloadPath) -> Self {
        path.segments.join(".")
    }
}

impl std::fmt::Display for PayloadPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
