//! # astreams-rs: ActivityStreams 2.0 vocabulary codec
//!
//! Decodes generic JSON-LD value trees into strongly-typed vocabulary
//! entities and encodes them back, without losing anything it does not
//! understand.
//!
//! ## Design Principles
//!
//! 1. **Schema tables, not class hierarchies**: every type is a static
//!    [`TypeSchema`]; inheritance is listing the ancestor's property groups
//! 2. **Resolver at the seam**: the core finds nested types through the
//!    [`TypeResolver`] trait and never names a concrete vocabulary type
//! 3. **Lossless**: unparseable literals, unregistered types and
//!    undeclared keys survive a round trip verbatim
//! 4. **Priority is a contract**: the first declared alternative that
//!    accepts a value wins
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use astreams_rs::Codec;
//!
//! # fn example() -> astreams_rs::Result<()> {
//! let codec = Codec::activity_streams();
//! let note = codec.from_json_str(r#"{
//!     "type": "Note",
//!     "id": "https://example.com/notes/1",
//!     "contentMap": {"en": "Hello", "fr": "Bonjour"},
//!     "x-custom": {"k": 1}
//! }"#)?;
//!
//! assert_eq!(note.type_name(), "Note");
//! assert_eq!(note.language_map("content").and_then(|m| m.get("fr")), Some("Bonjour"));
//! assert!(note.unknown().contains_key("x-custom"));
//!
//! let json = codec.to_json_string(&note)?;
//! assert!(json.contains("Bonjour"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolvers
//!
//! | Resolver | Constructor | Description |
//! |----------|-------------|-------------|
//! | Default | [`Codec::activity_streams`] | Core vocabulary, shared `'static` registry |
//! | Extended | [`Codec::with_resolver`] | A cloned [`TypeRegistry`] with extension types |
//! | Custom | [`Codec::with_resolver`] | Any [`TypeResolver`] implementation |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod primitives;
pub mod registry;
pub mod schema;
pub mod vocab;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Entity, NaturalLanguageMap, PropertyValue, PropertyValues,
    UnknownValueBag, Value, ValueMap,
};

// ============================================================================
// Re-exports: Schema, registry, primitives
// ============================================================================

pub use primitives::{IsoDuration, Iri, Lexical, Units};
pub use registry::{Constructor, TypeRegistry, TypeResolver};
pub use schema::{Alternative, Capability, Multiplicity, PropertySpec, ScalarKind, TypeSchema};

use model::entity::decode_types;
use model::property::DecodeContext;
use model::CONTEXT_KEY;
use tracing::debug;

// ============================================================================
// Configuration
// ============================================================================

/// Codec settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Add `@context` to serialized top-level entities.
    pub emit_context: bool,
    /// The context value emitted when `emit_context` is set.
    pub context: String,
    /// Maximum embedding depth accepted while decoding.
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            emit_context: false,
            context: vocab::NAMESPACE.to_owned(),
            max_depth: DecodeContext::DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// Top-level Codec handle
// ============================================================================

/// The primary entry point. A `Codec` wraps a type resolver and turns
/// value trees into entities and back.
#[derive(Debug, Clone)]
pub struct Codec<R: TypeResolver> {
    resolver: R,
    config: CodecConfig,
}

impl Codec<&'static TypeRegistry> {
    /// Codec over the built-in vocabulary.
    pub fn activity_streams() -> Self {
        Self::with_resolver(vocab::registry())
    }
}

impl<R: TypeResolver> Codec<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver, config: CodecConfig::default() }
    }

    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Decode a top-level entity. The first `type` token the resolver
    /// knows selects the schema, whatever its capabilities. A token that
    /// is not a string is an [`Error::InvalidTypeToken`].
    pub fn deserialize(&self, value: &Value) -> Result<Entity> {
        let map = value.as_map().ok_or(Error::NotAnObject { got: value.type_name() })?;
        let raw_type = map.get(model::TYPE_KEY).ok_or(Error::MissingType)?;
        let tokens = decode_types(raw_type)?;
        let Some(ctor) = tokens.iter().find_map(|t| self.resolver.lookup_any(t)) else {
            debug!(types = ?tokens, "no registered type for top-level entity");
            return Err(Error::UnresolvedType(raw_type.to_string()));
        };
        let mut entity = ctor.construct();
        entity.decode_map(map, &self.context())?;
        Ok(entity)
    }

    /// Decode against a schema chosen by the caller. The `type` field is
    /// kept but not consulted.
    pub fn decode_as(&self, schema: &'static TypeSchema, value: &Value) -> Result<Entity> {
        let map = value.as_map().ok_or(Error::NotAnObject { got: value.type_name() })?;
        let mut entity = Entity::new(schema);
        entity.decode_map(map, &self.context())?;
        Ok(entity)
    }

    pub fn serialize(&self, entity: &Entity) -> Value {
        let mut value = entity.encode();
        if self.config.emit_context {
            if let Value::Map(map) = &mut value {
                map.entry(CONTEXT_KEY.to_owned())
                    .or_insert_with(|| Value::String(self.config.context.clone()));
            }
        }
        value
    }

    pub fn from_json_str(&self, json: &str) -> Result<Entity> {
        let value: Value = serde_json::from_str(json)?;
        self.deserialize(&value)
    }

    pub fn to_json_string(&self, entity: &Entity) -> Result<String> {
        Ok(serde_json::to_string(&self.serialize(entity))?)
    }

    fn context(&self) -> DecodeContext<'_> {
        DecodeContext::new(&self.resolver, self.config.max_depth)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Expected an object, got {got}")]
    NotAnObject { got: &'static str },

    #[error("Property {property} admits no embedded object")]
    UnexpectedObject { property: String },

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Type token must be a string, got {got}")]
    InvalidTypeToken { got: String },

    #[error("Entity has no type")]
    MissingType,

    #[error("No registered type among {0}")]
    UnresolvedType(String),

    #[error("Invalid language map for {property}: {reason}")]
    InvalidLanguageMap { property: String, reason: String },

    #[error("{type_name} declares no property {property}")]
    UnknownProperty { type_name: String, property: String },

    #[error("Property {property} is {expected:?}")]
    MultiplicityMismatch { property: String, expected: Multiplicity },

    #[error("Property {property} does not admit {alternative}")]
    InadmissibleValue { property: String, alternative: String },

    #[error("Property {0} has no language map")]
    NotLanguageMappable(String),

    #[error("Key {0} is reserved")]
    ReservedKey(String),

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Embedding deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("Invalid IRI {input:?}: {reason}")]
    InvalidIri { input: String, reason: String },

    #[error("Invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("Invalid date-time {input:?}: {reason}")]
    InvalidDateTime { input: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
