//! Ordered value list for non-functional properties.

use super::{PropertyValue, Value};
use crate::{Error, Result};

/// The occurrences of one non-functional property, in wire order.
///
/// Order is meaningful: these are multiple asserted values, not a set.
/// Index operations never assume a non-empty list; out-of-range indices
/// return [`Error::IndexOutOfBounds`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyValues(Vec<PropertyValue>);

impl PropertyValues {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn as_slice(&self) -> &[PropertyValue] { &self.0 }
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyValue> { self.0.iter() }

    pub fn get(&self, index: usize) -> Result<&PropertyValue> {
        let len = self.0.len();
        self.0.get(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut PropertyValue> {
        let len = self.0.len();
        self.0.get_mut(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    pub fn append(&mut self, value: PropertyValue) {
        self.0.push(value);
    }

    pub fn prepend(&mut self, value: PropertyValue) {
        self.0.insert(0, value);
    }

    /// Insert before `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: PropertyValue) -> Result<()> {
        self.check(index, self.0.len() + 1)?;
        self.0.insert(index, value);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<PropertyValue> {
        self.check(index, self.0.len())?;
        Ok(self.0.remove(index))
    }

    /// Overwrite the value at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, value: PropertyValue) -> Result<PropertyValue> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check(a, self.0.len())?;
        self.check(b, self.0.len())?;
        self.0.swap(a, b);
        Ok(())
    }

    fn check(&self, index: usize, bound: usize) -> Result<()> {
        if index < bound {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds { index, len: self.0.len() })
        }
    }

    /// One occurrence folds to a bare value, several to a list.
    /// Empty lists encode to `None` so the key is omitted. A lone value
    /// that is itself a list keeps its outer array, or it would decode
    /// as several values.
    pub fn encode(&self) -> Option<Value> {
        match self.0.as_slice() {
            [] => None,
            [single] => Some(match single.encode() {
                list @ Value::List(_) => Value::List(vec![list]),
                other => other,
            }),
            many => Some(Value::List(many.iter().map(PropertyValue::encode).collect())),
        }
    }
}

impl From<Vec<PropertyValue>> for PropertyValues {
    fn from(v: Vec<PropertyValue>) -> Self { Self(v) }
}

impl FromIterator<PropertyValue> for PropertyValues {
    fn from_iter<I: IntoIterator<Item = PropertyValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PropertyValues {
    type Item = &'a PropertyValue;
    type IntoIter = std::slice::Iter<'a, PropertyValue>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}
