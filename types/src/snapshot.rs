//! Read-only exports of vault state.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde_json::{Map, Value};

use crate::FieldValue;

/// An independent copy of a vault's reserved and open fields.
///
/// Always holds `success`, `status` and `error_message`; never holds
/// `exception`. There is no mutating API, and the vault it came from keeps no
/// link to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    entries: BTreeMap<String, FieldValue>,
}

impl Snapshot {
    pub(crate) fn new(entries: BTreeMap<String, FieldValue>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a JSON object; error values become their display text.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Value::Object(object)
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, FieldValue>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a FieldValue);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a str, &'a FieldValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
