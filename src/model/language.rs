//! Natural-language side maps (`nameMap`, `summaryMap`, ...).

use std::collections::{BTreeMap, BTreeSet};

use super::{Value, ValueMap};
use crate::{Error, Result};

/// Language tag → text, carried next to a property's untagged values.
///
/// An empty string is a real value: `get` returns `Some("")` for it and
/// `None` only when the tag is absent, and `languages()` lists it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NaturalLanguageMap {
    entries: BTreeMap<String, String>,
}

impl NaturalLanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn languages(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries.get(tag).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Insert or overwrite; returns the previous text for `tag`.
    pub fn set(&mut self, tag: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(tag.into(), value.into())
    }

    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.entries.remove(tag)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read the wire form: a map of strings. `property` names the base
    /// property for error messages.
    pub fn decode(value: &Value, property: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidLanguageMap {
            property: property.to_owned(),
            reason,
        };
        let map = value
            .as_map()
            .ok_or_else(|| invalid(format!("expected map, got {}", value.type_name())))?;
        let mut entries = BTreeMap::new();
        for (tag, text) in map {
            let text = text
                .as_str()
                .ok_or_else(|| invalid(format!("value for {tag:?} is {}, not string", text.type_name())))?;
            entries.insert(tag.clone(), text.to_owned());
        }
        Ok(Self { entries })
    }

    pub fn encode(&self) -> Value {
        Value::Map(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<ValueMap>(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NaturalLanguageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
