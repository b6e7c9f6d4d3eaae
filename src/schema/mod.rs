//! # Schema tables
//!
//! Every vocabulary type is described by a static [`TypeSchema`]: its
//! canonical name, the capabilities it satisfies, and the properties it
//! carries. Each [`PropertySpec`] names the property, its multiplicity,
//! whether it has a natural-language sidecar, and the ordered list of
//! [`Alternative`]s a value may take on the wire.
//!
//! The order of `alternatives` is the resolution priority. It is a
//! contract: for input valid under several alternatives the first one
//! listed wins.

use std::fmt;

// ============================================================================
// Capabilities
// ============================================================================

/// An abstract role a concrete type can play, independent of inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Object,
    Link,
    Collection,
    OrderedCollection,
    CollectionPage,
    Image,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Object => "Object",
            Capability::Link => "Link",
            Capability::Collection => "Collection",
            Capability::OrderedCollection => "OrderedCollection",
            Capability::CollectionPage => "CollectionPage",
            Capability::Image => "Image",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scalar kinds
// ============================================================================

/// Non-map alternative kinds. Parsing and emitting live in
/// [`crate::primitives`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    NonNegativeInteger,
    Float,
    Boolean,
    DateTime,
    Duration,
    String,
    /// BCP47 language tag, e.g. `hreflang`.
    LanguageTag,
    /// RFC2045 media type, e.g. `text/html`.
    MimeType,
    /// One of the fixed distance unit keywords.
    Units,
    /// Bare reference identifier.
    Iri,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::NonNegativeInteger => "nonNegativeInteger",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::DateTime => "dateTime",
            ScalarKind::Duration => "duration",
            ScalarKind::String => "string",
            ScalarKind::LanguageTag => "bcp47",
            ScalarKind::MimeType => "mimeType",
            ScalarKind::Units => "units",
            ScalarKind::Iri => "anyURI",
        }
    }
}

// ============================================================================
// Alternatives and properties
// ============================================================================

/// One admissible representation of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alternative {
    /// An embedded map whose type name resolves to this capability.
    Typed(Capability),
    /// A scalar literal of this kind.
    Scalar(ScalarKind),
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alternative::Typed(c) => write!(f, "{c}"),
            Alternative::Scalar(k) => f.write_str(k.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Zero or one value.
    Functional,
    /// An ordered list of values.
    NonFunctional,
}

/// Declaration of one property on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub multiplicity: Multiplicity,
    pub alternatives: &'static [Alternative],
    /// Whether a `<name>Map` sibling key carries language-tagged values.
    pub language_map: bool,
}

impl PropertySpec {
    pub const fn functional(name: &'static str, alternatives: &'static [Alternative]) -> Self {
        Self { name, multiplicity: Multiplicity::Functional, alternatives, language_map: false }
    }

    pub const fn non_functional(name: &'static str, alternatives: &'static [Alternative]) -> Self {
        Self { name, multiplicity: Multiplicity::NonFunctional, alternatives, language_map: false }
    }

    /// Same property with a natural-language sidecar.
    pub const fn with_language_map(mut self) -> Self {
        self.language_map = true;
        self
    }

    pub fn is_functional(&self) -> bool {
        self.multiplicity == Multiplicity::Functional
    }

    /// Typed alternatives in declared order.
    pub fn typed_alternatives(&self) -> impl Iterator<Item = Capability> + '_ {
        self.alternatives.iter().filter_map(|a| match a {
            Alternative::Typed(c) => Some(*c),
            Alternative::Scalar(_) => None,
        })
    }

    /// Scalar alternatives in declared order.
    pub fn scalar_alternatives(&self) -> impl Iterator<Item = ScalarKind> + '_ {
        self.alternatives.iter().filter_map(|a| match a {
            Alternative::Scalar(k) => Some(*k),
            Alternative::Typed(_) => None,
        })
    }

    pub fn admits_embedding(&self) -> bool {
        self.typed_alternatives().next().is_some()
    }

    pub fn admits(&self, alternative: Alternative) -> bool {
        self.alternatives.contains(&alternative)
    }
}

/// Declaration of one concrete vocabulary type.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeSchema {
    /// Canonical type name as it appears in the `type` field.
    pub name: &'static str,
    pub capabilities: &'static [Capability],
    /// Property groups; a type inherits by listing its ancestors' groups.
    pub properties: &'static [&'static [PropertySpec]],
}

impl TypeSchema {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Find a declared property by wire name.
    pub fn property(&self, name: &str) -> Option<&'static PropertySpec> {
        self.properties
            .iter()
            .flat_map(|group| group.iter())
            .find(|p| p.name == name)
    }

    /// Find the property whose language sidecar uses this wire key.
    pub fn language_map_property(&self, key: &str) -> Option<&'static PropertySpec> {
        let base = key.strip_suffix("Map")?;
        self.property(base).filter(|p| p.language_map)
    }

    pub fn all_properties(&self) -> impl Iterator<Item = &'static PropertySpec> + '_ {
        self.properties.iter().flat_map(|group| group.iter())
    }
}
