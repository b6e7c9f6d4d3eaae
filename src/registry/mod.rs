//! # Type Resolution
//!
//! The contract between the codec core and a vocabulary package. The
//! core never names concrete vocabulary types; when it meets a `type`
//! token inside a property value it asks a [`TypeResolver`] for a
//! [`Constructor`] that satisfies the capability the property declares.
//!
//! ## Implementations
//!
//! | Resolver | Module | Description |
//! |----------|--------|-------------|
//! | `TypeRegistry` | `table` | Hash table filled once at startup |
//! | `&R` | here | Borrowed resolver, for sharing a `'static` registry |

pub mod table;

use crate::model::Entity;
use crate::schema::{Capability, TypeSchema};

pub use table::TypeRegistry;

/// Builds an empty entity of one concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constructor(&'static TypeSchema);

impl Constructor {
    pub fn new(schema: &'static TypeSchema) -> Self {
        Self(schema)
    }

    pub fn schema(&self) -> &'static TypeSchema {
        self.0
    }

    pub fn construct(&self) -> Entity {
        Entity::new(self.0)
    }
}

/// Narrow lookup capability handed to the decoder.
///
/// Unknown names return `None`, never an error, so resolution can fall
/// through to the next declared alternative. Implementations must be
/// safe for concurrent reads.
pub trait TypeResolver: Send + Sync {
    /// A constructor for `type_name` if that type satisfies `capability`.
    fn lookup(&self, type_name: &str, capability: Capability) -> Option<Constructor>;

    /// A constructor for `type_name`, whatever its capabilities.
    fn lookup_any(&self, type_name: &str) -> Option<Constructor>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn lookup(&self, type_name: &str, capability: Capability) -> Option<Constructor> {
        (**self).lookup(type_name, capability)
    }

    fn lookup_any(&self, type_name: &str) -> Option<Constructor> {
        (**self).lookup_any(type_name)
    }
}
