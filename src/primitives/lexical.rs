//! Parsed literals that remember their wire spelling.
//!
//! Several wire forms parse to the same value: `36` and `36.0`, `+00:00`
//! and `Z`, `PT1.50S` and `PT1.5S`. A [`Lexical`] keeps the wire value it
//! was read from whenever that differs from the canonical emitter's
//! output, and writes it back unchanged. Values built in code carry no
//! source and are emitted canonically.

use super::Value;

/// A parsed literal plus the wire value it was read from, when that
/// differs from the canonical spelling.
///
/// Equality compares the parsed value only.
#[derive(Debug, Clone)]
pub struct Lexical<T> {
    value: T,
    source: Option<Value>,
}

impl<T> Lexical<T> {
    pub fn new(value: T) -> Self {
        Self { value, source: None }
    }

    /// Wrap a value parsed from `wire`. The wire value is kept only when
    /// `canonical` would spell the value differently.
    pub(crate) fn read(value: T, wire: &Value, canonical: impl FnOnce(&T) -> Value) -> Self {
        let source = (canonical(&value) != *wire).then(|| wire.clone());
        Self { value, source }
    }

    pub fn value(&self) -> &T { &self.value }

    /// The wire value this literal was read from, if it was not canonical.
    pub fn source(&self) -> Option<&Value> { self.source.as_ref() }

    pub fn into_inner(self) -> T { self.value }

    pub(crate) fn encode(&self, canonical: impl FnOnce(&T) -> Value) -> Value {
        match &self.source {
            Some(wire) => wire.clone(),
            None => canonical(&self.value),
        }
    }
}

impl<T: PartialEq> PartialEq for Lexical<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> From<T> for Lexical<T> {
    fn from(value: T) -> Self { Self::new(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(f: &f64) -> Value { Value::Float(*f) }

    #[test]
    fn test_canonical_wire_keeps_no_source() {
        let l = Lexical::read(1.5, &Value::Float(1.5), float);
        assert!(l.source().is_none());
        assert_eq!(l.encode(float), Value::Float(1.5));
    }

    #[test]
    fn test_other_spelling_is_written_back() {
        let l = Lexical::read(36.0, &Value::Int(36), float);
        assert_eq!(l.source(), Some(&Value::Int(36)));
        assert_eq!(l.encode(float), Value::Int(36));
        // same number, so equal to a value built in code
        assert_eq!(l, Lexical::new(36.0));
        assert_eq!(Lexical::new(36.0).encode(float), Value::Float(36.0));
    }
}
