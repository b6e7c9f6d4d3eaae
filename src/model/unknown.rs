//! Passthrough storage for keys the schema does not declare.

use std::collections::BTreeMap;

use tracing::debug;

use super::Value;

/// The linked-data context key. Consumed upstream, never bagged.
pub const CONTEXT_KEY: &str = "@context";

/// Field name → raw wire value, re-emitted verbatim on encode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownValueBag {
    fields: BTreeMap<String, Value>,
}

impl UnknownValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field. The `@context` key is dropped and `None` returned.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if key == CONTEXT_KEY {
            debug!("dropping {CONTEXT_KEY} instead of bagging it");
            return None;
        }
        self.fields.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize { self.fields.len() }
    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
