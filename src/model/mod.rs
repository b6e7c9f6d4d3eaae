//! # Vocabulary data model
//!
//! The types every decode and encode passes through: the generic wire
//! [`Value`] tree, the polymorphic [`PropertyValue`], the ordered
//! [`PropertyValues`] list, the [`NaturalLanguageMap`] sidecar, the
//! [`UnknownValueBag`], and the [`Entity`] that owns them.
//!
//! Design rule: nothing here names a concrete vocabulary type. Nested
//! types are found through [`crate::registry::TypeResolver`].
//! This module is pure data: no I/O, no global state.

pub mod entity;
pub mod language;
pub mod property;
pub mod unknown;
pub mod value;
pub mod values;

pub use entity::{Entity, ID_KEY, TYPE_KEY};
pub use language::NaturalLanguageMap;
pub use property::PropertyValue;
pub use unknown::{UnknownValueBag, CONTEXT_KEY};
pub use value::{Value, ValueMap};
pub use values::PropertyValues;
