//! Polymorphic property values and their resolution.
//!
//! A [`PropertyValue`] is one occurrence of a property. It holds exactly
//! one representation: an embedded entity, one of the scalar kinds, or
//! the raw wire value when nothing declared for the property matched.
//!
//! ## Resolution
//!
//! ```text
//! map with "type"    → typed alternatives in declared order, each asked of
//!                      the resolver for every type token; first hit decodes
//!                      the map, no hit keeps the map as Unknown
//! map without "type" → Unknown
//! scalar             → scalar parsers in declared order, first hit wins,
//!                      none keeps the literal as Unknown
//! list / null        → Unknown
//! ```
//!
//! A map fed to a property with no typed alternative at all is an error:
//! there is nothing the map could legitimately be.

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use super::{Entity, Value};
use crate::primitives::{self, IsoDuration, Iri, Lexical, Units};
use crate::registry::TypeResolver;
use crate::schema::{Alternative, Capability, PropertySpec, ScalarKind};
use crate::{Error, Result};

/// One occurrence of a property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// An embedded entity, tagged with the capability it was admitted as.
    Embedded {
        capability: Capability,
        entity: Box<Entity>,
    },
    NonNegativeInteger(u64),
    Float(Lexical<f64>),
    Boolean(bool),
    DateTime(Lexical<DateTime<FixedOffset>>),
    Duration(Lexical<IsoDuration>),
    String(String),
    LanguageTag(String),
    MimeType(String),
    Units(Units),
    Iri(Iri),
    /// The raw wire value, kept verbatim because no declared alternative
    /// accepted it.
    Unknown(Value),
}

impl PropertyValue {
    /// Embed `entity` as the given capability.
    pub fn embed(capability: Capability, entity: Entity) -> Self {
        PropertyValue::Embedded { capability, entity: Box::new(entity) }
    }

    /// The declared alternative this value occupies, or `None` for Unknown.
    pub fn alternative(&self) -> Option<Alternative> {
        let kind = match self {
            PropertyValue::Embedded { capability, .. } => return Some(Alternative::Typed(*capability)),
            PropertyValue::Unknown(_) => return None,
            PropertyValue::NonNegativeInteger(_) => ScalarKind::NonNegativeInteger,
            PropertyValue::Float(_) => ScalarKind::Float,
            PropertyValue::Boolean(_) => ScalarKind::Boolean,
            PropertyValue::DateTime(_) => ScalarKind::DateTime,
            PropertyValue::Duration(_) => ScalarKind::Duration,
            PropertyValue::String(_) => ScalarKind::String,
            PropertyValue::LanguageTag(_) => ScalarKind::LanguageTag,
            PropertyValue::MimeType(_) => ScalarKind::MimeType,
            PropertyValue::Units(_) => ScalarKind::Units,
            PropertyValue::Iri(_) => ScalarKind::Iri,
        };
        Some(Alternative::Scalar(kind))
    }

    pub fn is_unknown(&self) -> bool { matches!(self, PropertyValue::Unknown(_)) }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            PropertyValue::Embedded { entity, .. } => Some(entity),
            _ => None,
        }
    }

    pub fn as_entity_mut(&mut self) -> Option<&mut Entity> {
        match self {
            PropertyValue::Embedded { entity, .. } => Some(entity),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            PropertyValue::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) | PropertyValue::LanguageTag(s) | PropertyValue::MimeType(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PropertyValue::NonNegativeInteger(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f.value()),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            PropertyValue::DateTime(dt) => Some(dt.value()),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&IsoDuration> {
        match self {
            PropertyValue::Duration(d) => Some(d.value()),
            _ => None,
        }
    }

    pub fn as_unknown(&self) -> Option<&Value> {
        match self {
            PropertyValue::Unknown(v) => Some(v),
            _ => None,
        }
    }

    /// The identifier this value points at: a bare IRI, or the `id` of an
    /// embedded entity.
    pub fn reference(&self) -> Option<&Iri> {
        match self {
            PropertyValue::Iri(iri) => Some(iri),
            PropertyValue::Embedded { entity, .. } => entity.id(),
            _ => None,
        }
    }

    /// Whether this value may sit in a slot declared by `spec`.
    pub(crate) fn admissible_for(&self, spec: &PropertySpec) -> bool {
        match self {
            PropertyValue::Unknown(_) => true,
            PropertyValue::Embedded { capability, entity } => {
                spec.admits(Alternative::Typed(*capability)) && entity.schema().has_capability(*capability)
            }
            other => other.alternative().is_some_and(|a| spec.admits(a)),
        }
    }

    // ========================================================================
    // Encode
    // ========================================================================

    pub fn encode(&self) -> Value {
        match self {
            PropertyValue::Embedded { entity, .. } => entity.encode(),
            PropertyValue::NonNegativeInteger(n) => primitives::encode_non_negative_integer(*n),
            PropertyValue::Float(f) => f.encode(primitives::encode_float),
            PropertyValue::Boolean(b) => Value::Bool(*b),
            PropertyValue::DateTime(dt) => dt.encode(primitives::encode_date_time),
            PropertyValue::Duration(d) => d.encode(primitives::encode_duration),
            PropertyValue::String(s)
            | PropertyValue::LanguageTag(s)
            | PropertyValue::MimeType(s) => Value::String(s.clone()),
            PropertyValue::Units(u) => Value::String(u.as_str().to_owned()),
            PropertyValue::Iri(iri) => Value::String(iri.as_str().to_owned()),
            PropertyValue::Unknown(raw) => raw.clone(),
        }
    }

    // ========================================================================
    // Decode (resolution)
    // ========================================================================

    /// Resolve one wire value against the alternatives `spec` declares.
    pub fn resolve(value: &Value, spec: &PropertySpec, resolver: &dyn TypeResolver) -> Result<Self> {
        Self::resolve_in(value, spec, &DecodeContext::new(resolver, DecodeContext::DEFAULT_MAX_DEPTH))
    }

    pub(crate) fn resolve_in(value: &Value, spec: &PropertySpec, ctx: &DecodeContext<'_>) -> Result<Self> {
        match value {
            Value::Map(map) => {
                if !spec.admits_embedding() {
                    return Err(Error::UnexpectedObject { property: spec.name.to_owned() });
                }
                let tokens = type_tokens(value);
                if tokens.is_empty() {
                    debug!(property = spec.name, "untyped map kept as unknown");
                    return Ok(PropertyValue::Unknown(value.clone()));
                }
                for capability in spec.typed_alternatives() {
                    for token in &tokens {
                        if let Some(ctor) = ctx.resolver.lookup(token, capability) {
                            let mut entity = ctor.construct();
                            // committed: failures below are hard errors
                            entity.decode_map(map, &ctx.nested()?)?;
                            return Ok(PropertyValue::embed(capability, entity));
                        }
                    }
                }
                debug!(property = spec.name, types = ?tokens, "no resolver match, kept as unknown");
                Ok(PropertyValue::Unknown(value.clone()))
            }
            v if v.is_scalar() => {
                for kind in spec.scalar_alternatives() {
                    if let Some(resolved) = primitives::parse_scalar(kind, v) {
                        return Ok(resolved);
                    }
                }
                debug!(property = spec.name, value = %v, "no scalar parser accepted literal, kept as unknown");
                Ok(PropertyValue::Unknown(v.clone()))
            }
            other => Ok(PropertyValue::Unknown(other.clone())),
        }
    }
}

/// String type tokens of a map's `type` field. Anything that is not a
/// string (or a list of strings) contributes nothing.
pub(crate) fn type_tokens(value: &Value) -> Vec<&str> {
    match value.get("type") {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::List(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<Iri> for PropertyValue { fn from(v: Iri) -> Self { PropertyValue::Iri(v) } }
impl From<u64> for PropertyValue { fn from(v: u64) -> Self { PropertyValue::NonNegativeInteger(v) } }
impl From<f64> for PropertyValue { fn from(v: f64) -> Self { PropertyValue::Float(v.into()) } }
impl From<bool> for PropertyValue { fn from(v: bool) -> Self { PropertyValue::Boolean(v) } }
impl From<IsoDuration> for PropertyValue { fn from(v: IsoDuration) -> Self { PropertyValue::Duration(v.into()) } }
impl From<Units> for PropertyValue { fn from(v: Units) -> Self { PropertyValue::Units(v) } }
impl From<DateTime<FixedOffset>> for PropertyValue {
    fn from(v: DateTime<FixedOffset>) -> Self { PropertyValue::DateTime(v.into()) }
}
impl From<&str> for PropertyValue { fn from(v: &str) -> Self { PropertyValue::String(v.to_owned()) } }
impl From<String> for PropertyValue { fn from(v: String) -> Self { PropertyValue::String(v) } }

// ============================================================================
// Decode context
// ============================================================================

/// Per-call decode state: the resolver and the embedding depth budget.
#[derive(Clone, Copy)]
pub(crate) struct DecodeContext<'a> {
    pub resolver: &'a dyn TypeResolver,
    pub max_depth: usize,
    pub depth: usize,
}

impl<'a> DecodeContext<'a> {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new(resolver: &'a dyn TypeResolver, max_depth: usize) -> Self {
        Self { resolver, max_depth, depth: 0 }
    }

    /// Context for an entity embedded one level deeper.
    pub fn nested(&self) -> Result<Self> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthExceeded { limit: self.max_depth });
        }
        Ok(Self { depth: self.depth + 1, ..*self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use crate::schema::{Multiplicity, TypeSchema};

    const IRI: Alternative = Alternative::Scalar(ScalarKind::Iri);

    const THING_PROPS: &[PropertySpec] = &[
        PropertySpec::functional("size", &[Alternative::Scalar(ScalarKind::NonNegativeInteger), IRI]),
        PropertySpec::non_functional("related", &[Alternative::Typed(Capability::Object), Alternative::Typed(Capability::Link), IRI]),
    ];

    static THING: TypeSchema = TypeSchema {
        name: "Thing",
        capabilities: &[Capability::Object],
        properties: &[THING_PROPS],
    };

    static POINTER: TypeSchema = TypeSchema {
        name: "Pointer",
        capabilities: &[Capability::Link],
        properties: &[],
    };

    fn registry() -> TypeRegistry {
        let mut r = TypeRegistry::new();
        r.register(&THING);
        r.register(&POINTER);
        r
    }

    fn related() -> &'static PropertySpec {
        THING.property("related").unwrap()
    }

    #[test]
    fn test_typed_map_resolves_by_capability_order() {
        let r = registry();
        let v = Value::from(serde_json::json!({"type": "Pointer"}));
        let pv = PropertyValue::resolve(&v, related(), &r).unwrap();
        assert_eq!(pv.alternative(), Some(Alternative::Typed(Capability::Link)));
        assert_eq!(pv.as_entity().unwrap().type_name(), "Pointer");
    }

    #[test]
    fn test_first_known_token_wins() {
        let r = registry();
        let v = Value::from(serde_json::json!({"type": ["x:Custom", "Thing"]}));
        let pv = PropertyValue::resolve(&v, related(), &r).unwrap();
        assert_eq!(pv.as_entity().unwrap().type_name(), "Thing");
    }

    #[test]
    fn test_unregistered_type_is_unknown_not_iri() {
        let r = registry();
        let v = Value::from(serde_json::json!({"type": "Widget", "id": "https://example.com/w"}));
        let pv = PropertyValue::resolve(&v, related(), &r).unwrap();
        assert_eq!(pv, PropertyValue::Unknown(v));
    }

    #[test]
    fn test_untyped_map_is_unknown() {
        let r = registry();
        let v = Value::from(serde_json::json!({"id": "https://example.com/w"}));
        assert!(PropertyValue::resolve(&v, related(), &r).unwrap().is_unknown());
    }

    #[test]
    fn test_map_without_typed_alternative_is_error() {
        let r = registry();
        let v = Value::from(serde_json::json!({"type": "Thing"}));
        let err = PropertyValue::resolve(&v, THING.property("size").unwrap(), &r).unwrap_err();
        assert!(matches!(err, Error::UnexpectedObject { ref property } if property == "size"));
    }

    #[test]
    fn test_scalar_priority() {
        let r = registry();
        let size = THING.property("size").unwrap();
        assert_eq!(PropertyValue::resolve(&Value::Int(7), size, &r).unwrap(), PropertyValue::NonNegativeInteger(7));
        assert!(matches!(
            PropertyValue::resolve(&Value::from("https://example.com/7"), size, &r).unwrap(),
            PropertyValue::Iri(_)
        ));
        assert_eq!(
            PropertyValue::resolve(&Value::from("big"), size, &r).unwrap(),
            PropertyValue::Unknown(Value::from("big"))
        );
        assert_eq!(
            PropertyValue::resolve(&Value::Null, size, &r).unwrap(),
            PropertyValue::Unknown(Value::Null)
        );
    }

    #[test]
    fn test_committed_decode_failure_propagates() {
        let r = registry();
        let v = Value::from(serde_json::json!({"type": "Thing", "id": "no scheme"}));
        assert!(matches!(
            PropertyValue::resolve(&v, related(), &r),
            Err(Error::InvalidId(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let r = registry();
        let mut v = serde_json::json!({"type": "Thing"});
        for _ in 0..10 {
            v = serde_json::json!({"type": "Thing", "related": v});
        }
        let ctx = DecodeContext::new(&r, 4);
        let err = PropertyValue::resolve_in(&Value::from(v), related(), &ctx).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { limit: 4 }));
    }

    #[test]
    fn test_admissibility() {
        let related = related();
        assert!(PropertyValue::Iri(Iri::parse("https://example.com").unwrap()).admissible_for(related));
        assert!(!PropertyValue::from(1.0).admissible_for(related));
        assert!(PropertyValue::embed(Capability::Link, Entity::new(&POINTER)).admissible_for(related));
        // Pointer is not an Object
        assert!(!PropertyValue::embed(Capability::Object, Entity::new(&POINTER)).admissible_for(related));
        assert_eq!(related.multiplicity, Multiplicity::NonFunctional);
    }
}
