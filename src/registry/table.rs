//! Hash-table type registry.
//!
//! Filled once at startup and only read afterwards. There is no interior
//! mutability: once the registry is shared (for example behind a
//! `OnceLock` or an `Arc`) nothing can change it.

use hashbrown::HashMap;
use tracing::warn;

use super::{Constructor, TypeResolver};
use crate::schema::{Capability, TypeSchema};

/// Type name → schema, exact case-sensitive match.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, &'static TypeSchema>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type under its canonical name, returning the schema it
    /// replaced, if any.
    pub fn register(&mut self, schema: &'static TypeSchema) -> Option<&'static TypeSchema> {
        let previous = self.types.insert(schema.name, schema);
        if previous.is_some() {
            warn!(type_name = schema.name, "type registration replaced an earlier one");
        }
        previous
    }

    pub fn extend(&mut self, schemas: impl IntoIterator<Item = &'static TypeSchema>) {
        for schema in schemas {
            self.register(schema);
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&'static TypeSchema> {
        self.types.get(type_name).copied()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize { self.types.len() }
    pub fn is_empty(&self) -> bool { self.types.is_empty() }

    /// Registered type names, unordered.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }
}

impl FromIterator<&'static TypeSchema> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = &'static TypeSchema>>(iter: I) -> Self {
        let mut registry = TypeRegistry::new();
        registry.extend(iter);
        registry
    }
}

impl TypeResolver for TypeRegistry {
    fn lookup(&self, type_name: &str, capability: Capability) -> Option<Constructor> {
        self.get(type_name)
            .filter(|schema| schema.has_capability(capability))
            .map(Constructor::new)
    }

    fn lookup_any(&self, type_name: &str) -> Option<Constructor> {
        self.get(type_name).map(Constructor::new)
    }
}
