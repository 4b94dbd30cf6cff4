//! SecretLog type.
//!
//! Values written during one run, kept for end-of-run disclosure.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use zeroize::Zeroize;

use crate::core::types::Origin;

/// Ordered `origin -> value` pairs, origin being `<stack>/<KEY>`.
///
/// Values are wiped from memory when the log is dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretLog {
    entries: Vec<(Origin, String)>,
}

impl SecretLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written value.
    pub fn push(&mut self, origin: impl Into<Origin>, value: impl Into<String>) {
        self.entries.push((origin.into(), value.into()));
    }

    /// Move all entries of `other` to the end of this log.
    pub fn append(&mut self, other: &mut SecretLog) {
        self.entries.append(&mut other.entries);
    }

    /// Value recorded for `origin`.
    pub fn get(&self, origin: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(o, _)| o == origin)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(o, v)| (o.as_str(), v.as_str()))
    }

    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(o, _)| o.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for SecretLog {
    fn drop(&mut self) {
        for (_, value) in &mut self.entries {
            value.zeroize();
        }
    }
}

// Keep values out of debug output and logs.
impl fmt::Debug for SecretLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.origins()).finish()
    }
}

struct Entry<'a>(&'a str, &'a str);

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Entry", 2)?;
        s.serialize_field("origin", self.0)?;
        s.serialize_field("value", self.1)?;
        s.end()
    }
}

impl Serialize for SecretLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(o, v)| Entry(o, v)))
    }
}
