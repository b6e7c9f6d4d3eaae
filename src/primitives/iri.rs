//! Absolute IRI references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An absolute IRI: a scheme, a colon, and a non-empty remainder.
///
/// Only the lexical shape is checked. The scheme is lowercased on parse,
/// which is the canonical form re-emitted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri(String);

impl Iri {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidIri {
            input: input.to_owned(),
            reason: reason.to_owned(),
        };

        let (scheme, rest) = input.split_once(':').ok_or_else(|| invalid("missing scheme"))?;
        let mut chars = scheme.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(invalid("scheme must start with a letter")),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return Err(invalid("illegal character in scheme"));
        }
        if rest.is_empty() {
            return Err(invalid("empty after scheme"));
        }

        let bytes = rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'%' => {
                    let ok = bytes.len() > i + 2
                        && bytes[i + 1].is_ascii_hexdigit()
                        && bytes[i + 2].is_ascii_hexdigit();
                    if !ok {
                        return Err(invalid("malformed percent escape"));
                    }
                    i += 3;
                    continue;
                }
                b if b.is_ascii_control() || b == b' ' => {
                    return Err(invalid("whitespace or control character"));
                }
                b'<' | b'>' | b'"' | b'{' | b'}' | b'|' | b'\\' | b'^' | b'`' => {
                    return Err(invalid("illegal character"));
                }
                _ => {}
            }
            i += 1;
        }

        Ok(Iri(format!("{}:{rest}", scheme.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.split_once(':').map(|(s, _)| s).unwrap_or_default()
    }

    /// The authority component, for hierarchical IRIs (`scheme://authority/...`).
    pub fn authority(&self) -> Option<&str> {
        let rest = self.0.split_once(':')?.1.strip_prefix("//")?;
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

impl FromStr for Iri {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> { Iri::parse(s) }
}

impl TryFrom<String> for Iri {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> { Iri::parse(&s) }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self { iri.0 }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
