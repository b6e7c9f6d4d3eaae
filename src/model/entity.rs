//! Vocabulary records.
//!
//! An [`Entity`] is one concrete record (a note, a link, a collection...)
//! whose shape comes from its static [`TypeSchema`]. It owns its property
//! slots, language maps and unknown-field bag as a plain tree; other
//! entities are referenced by identifier unless a property's alternatives
//! allow embedding.

use std::collections::BTreeMap;
use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

use super::property::{DecodeContext, PropertyValue};
use super::unknown::CONTEXT_KEY;
use super::{NaturalLanguageMap, PropertyValues, UnknownValueBag, Value, ValueMap};
use crate::primitives::Iri;
use crate::schema::{Multiplicity, PropertySpec, TypeSchema};
use crate::{Error, Result};

pub const ID_KEY: &str = "id";
pub const TYPE_KEY: &str = "type";

/// One concrete vocabulary record.
#[derive(Clone)]
pub struct Entity {
    schema: &'static TypeSchema,
    id: Option<Iri>,
    /// Ordered, duplicate-free type tokens.
    types: SmallVec<[String; 2]>,
    /// Functional properties hold exactly one value here.
    slots: BTreeMap<&'static str, PropertyValues>,
    language_maps: BTreeMap<&'static str, NaturalLanguageMap>,
    unknown: UnknownValueBag,
}

impl Entity {
    /// A fresh entity whose `types` holds the schema's own name.
    pub fn new(schema: &'static TypeSchema) -> Self {
        let mut types = SmallVec::new();
        types.push(schema.name.to_owned());
        Self {
            schema,
            id: None,
            types,
            slots: BTreeMap::new(),
            language_maps: BTreeMap::new(),
            unknown: UnknownValueBag::new(),
        }
    }

    pub fn schema(&self) -> &'static TypeSchema { self.schema }

    /// Canonical type name of the schema.
    pub fn type_name(&self) -> &'static str { self.schema.name }

    // ========================================================================
    // Identity
    // ========================================================================

    pub fn id(&self) -> Option<&Iri> { self.id.as_ref() }
    pub fn set_id(&mut self, id: Iri) { self.id = Some(id); }
    pub fn clear_id(&mut self) -> Option<Iri> { self.id.take() }

    pub fn types(&self) -> &[String] { &self.types }

    pub fn has_type(&self, token: &str) -> bool {
        self.types.iter().any(|t| t == token)
    }

    /// Append a type token unless already present.
    pub fn add_type(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.has_type(&token) {
            return false;
        }
        self.types.push(token);
        true
    }

    pub fn remove_type(&mut self, token: &str) -> bool {
        let before = self.types.len();
        self.types.retain(|t| t != token);
        self.types.len() != before
    }

    // ========================================================================
    // Property access
    // ========================================================================

    fn spec(&self, property: &str) -> Result<&'static PropertySpec> {
        self.schema.property(property).ok_or_else(|| Error::UnknownProperty {
            type_name: self.schema.name.to_owned(),
            property: property.to_owned(),
        })
    }

    fn spec_with(&self, property: &str, multiplicity: Multiplicity) -> Result<&'static PropertySpec> {
        let spec = self.spec(property)?;
        if spec.multiplicity != multiplicity {
            return Err(Error::MultiplicityMismatch {
                property: property.to_owned(),
                expected: multiplicity,
            });
        }
        Ok(spec)
    }

    fn check_admissible(spec: &PropertySpec, value: &PropertyValue) -> Result<()> {
        if value.admissible_for(spec) {
            Ok(())
        } else {
            Err(Error::InadmissibleValue {
                property: spec.name.to_owned(),
                alternative: value.alternative().map(|a| a.to_string()).unwrap_or_default(),
            })
        }
    }

    /// The value of a functional property.
    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        let spec = self.schema.property(property)?;
        if !spec.is_functional() {
            return None;
        }
        self.slots.get(spec.name)?.as_slice().first()
    }

    /// All values of a property, whatever its multiplicity.
    pub fn values(&self, property: &str) -> &[PropertyValue] {
        self.slots.get(property).map(PropertyValues::as_slice).unwrap_or_default()
    }

    pub fn has(&self, property: &str) -> bool {
        self.slots.contains_key(property)
    }

    /// Declared properties that currently hold a value, in name order.
    pub fn present_properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.keys().copied()
    }

    /// Set a functional property, returning the previous value.
    pub fn set(&mut self, property: &str, value: impl Into<PropertyValue>) -> Result<Option<PropertyValue>> {
        let spec = self.spec_with(property, Multiplicity::Functional)?;
        let value = value.into();
        Self::check_admissible(spec, &value)?;
        let old = self.slots.insert(spec.name, PropertyValues::from(vec![value]));
        Ok(old.and_then(|mut list| list.remove(0).ok()))
    }

    /// Remove every value of a property.
    pub fn clear(&mut self, property: &str) -> Result<()> {
        let spec = self.spec(property)?;
        self.slots.remove(spec.name);
        Ok(())
    }

    /// Resolve a non-functional property and check `value` against it.
    fn list_spec(&self, property: &str, value: Option<&PropertyValue>) -> Result<&'static PropertySpec> {
        let spec = self.spec_with(property, Multiplicity::NonFunctional)?;
        if let Some(value) = value {
            Self::check_admissible(spec, value)?;
        }
        Ok(spec)
    }

    /// Run `edit` on a list, dropping the slot if the edit leaves it empty.
    fn edit_list<T>(
        &mut self,
        spec: &'static PropertySpec,
        edit: impl FnOnce(&mut PropertyValues) -> Result<T>,
    ) -> Result<T> {
        let list = self.slots.entry(spec.name).or_default();
        let result = edit(list);
        if list.is_empty() {
            self.slots.remove(spec.name);
        }
        result
    }

    pub fn append(&mut self, property: &str, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        let spec = self.list_spec(property, Some(&value))?;
        self.edit_list(spec, |list| {
            list.append(value);
            Ok(())
        })
    }

    pub fn prepend(&mut self, property: &str, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        let spec = self.list_spec(property, Some(&value))?;
        self.edit_list(spec, |list| {
            list.prepend(value);
            Ok(())
        })
    }

    /// Insert before `index`; `index` equal to the length appends.
    pub fn insert(&mut self, property: &str, index: usize, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        let spec = self.list_spec(property, Some(&value))?;
        self.edit_list(spec, |list| list.insert(index, value))
    }

    pub fn remove(&mut self, property: &str, index: usize) -> Result<PropertyValue> {
        let spec = self.list_spec(property, None)?;
        self.edit_list(spec, |list| list.remove(index))
    }

    /// Overwrite the value at `index`, returning the old one.
    pub fn replace(&mut self, property: &str, index: usize, value: impl Into<PropertyValue>) -> Result<PropertyValue> {
        let value = value.into();
        let spec = self.list_spec(property, Some(&value))?;
        self.edit_list(spec, |list| list.replace(index, value))
    }

    pub fn swap(&mut self, property: &str, a: usize, b: usize) -> Result<()> {
        let spec = self.list_spec(property, None)?;
        self.edit_list(spec, |list| list.swap(a, b))
    }

    // ========================================================================
    // Language maps
    // ========================================================================

    pub fn language_map(&self, property: &str) -> Option<&NaturalLanguageMap> {
        self.language_maps.get(property)
    }

    /// The language map of a language-mappable property, created empty if
    /// it does not exist yet.
    pub fn language_map_mut(&mut self, property: &str) -> Result<&mut NaturalLanguageMap> {
        let spec = self.spec(property)?;
        if !spec.language_map {
            return Err(Error::NotLanguageMappable(property.to_owned()));
        }
        Ok(self.language_maps.entry(spec.name).or_default())
    }

    pub fn remove_language_map(&mut self, property: &str) -> Option<NaturalLanguageMap> {
        self.language_maps.remove(property)
    }

    // ========================================================================
    // Unknown fields
    // ========================================================================

    pub fn unknown(&self) -> &UnknownValueBag { &self.unknown }

    /// Store an undeclared top-level field. Keys the schema or the codec
    /// claims are refused.
    pub fn set_unknown(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        let claimed = key == ID_KEY
            || key == TYPE_KEY
            || key == CONTEXT_KEY
            || self.schema.property(&key).is_some()
            || self.schema.language_map_property(&key).is_some();
        if claimed {
            return Err(Error::ReservedKey(key));
        }
        Ok(self.unknown.insert(key, value))
    }

    pub fn remove_unknown(&mut self, key: &str) -> Option<Value> {
        self.unknown.remove(key)
    }

    // ========================================================================
    // Decode / encode
    // ========================================================================

    /// Fill this entity from a wire map. Keys are dispatched to the
    /// declared slot, the language map, or the unknown bag.
    pub(crate) fn decode_map(&mut self, map: &ValueMap, ctx: &DecodeContext<'_>) -> Result<()> {
        for (key, value) in map {
            trace!(type_name = self.schema.name, key = key.as_str(), "dispatch");
            match key.as_str() {
                CONTEXT_KEY => {}
                ID_KEY => self.id = Some(decode_id(value)?),
                TYPE_KEY => self.types = decode_types(value)?,
                _ => {
                    if let Some(spec) = self.schema.property(key) {
                        let slot = match spec.multiplicity {
                            Multiplicity::Functional => {
                                PropertyValues::from(vec![PropertyValue::resolve_in(value, spec, ctx)?])
                            }
                            Multiplicity::NonFunctional => {
                                let items = match value {
                                    Value::List(items) => items.as_slice(),
                                    single => std::slice::from_ref(single),
                                };
                                items
                                    .iter()
                                    .map(|v| PropertyValue::resolve_in(v, spec, ctx))
                                    .collect::<Result<PropertyValues>>()?
                            }
                        };
                        // `[]` asserts nothing; the key is dropped
                        if !slot.is_empty() {
                            self.slots.insert(spec.name, slot);
                        }
                    } else if let Some(spec) = self.schema.language_map_property(key) {
                        let lang = NaturalLanguageMap::decode(value, spec.name)?;
                        // `{}` asserts nothing, like `[]`
                        if !lang.is_empty() {
                            self.language_maps.insert(spec.name, lang);
                        }
                    } else {
                        self.unknown.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }

    /// Encode to a wire map. The schema's own type name is added to `type`
    /// when missing.
    pub fn encode(&self) -> Value {
        let mut map = ValueMap::new();
        for (key, value) in self.unknown.iter() {
            map.insert(key.to_owned(), value.clone());
        }

        if let Some(id) = &self.id {
            map.insert(ID_KEY.to_owned(), Value::String(id.as_str().to_owned()));
        }

        let mut types: Vec<&str> = self.types.iter().map(String::as_str).collect();
        if !types.contains(&self.schema.name) {
            types.push(self.schema.name);
        }
        let type_value = match types.as_slice() {
            [single] => Value::from(*single),
            many => Value::List(many.iter().map(|t| Value::from(*t)).collect()),
        };
        map.insert(TYPE_KEY.to_owned(), type_value);

        for (name, list) in &self.slots {
            let functional = self.schema.property(name).is_some_and(PropertySpec::is_functional);
            let encoded = match list.as_slice() {
                [single] if functional => Some(single.encode()),
                _ => list.encode(),
            };
            if let Some(v) = encoded {
                map.insert((*name).to_owned(), v);
            }
        }

        // an empty map asserts nothing
        for (name, lang) in self.language_maps.iter().filter(|(_, m)| !m.is_empty()) {
            map.insert(format!("{name}Map"), lang.encode());
        }

        Value::Map(map)
    }
}

fn decode_id(value: &Value) -> Result<Iri> {
    let s = value
        .as_str()
        .ok_or_else(|| Error::InvalidId(format!("expected string, got {}", value.type_name())))?;
    Iri::parse(s).map_err(|e| Error::InvalidId(e.to_string()))
}

pub(crate) fn decode_types(value: &Value) -> Result<SmallVec<[String; 2]>> {
    let items = match value {
        Value::List(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    let mut out: SmallVec<[String; 2]> = SmallVec::new();
    for item in items {
        let token = item.as_str().ok_or_else(|| Error::InvalidTypeToken {
            got: item.type_name().to_owned(),
        })?;
        if !out.iter().any(|t| t == token) {
            out.push(token.to_owned());
        }
    }
    Ok(out)
}

// ============================================================================
// Equality / Debug
// ============================================================================

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.id == other.id
            && self.types == other.types
            && self.slots == other.slots
            && self.language_maps == other.language_maps
            && self.unknown == other.unknown
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("schema", &self.schema.name)
            .field("id", &self.id)
            .field("types", &self.types)
            .field("slots", &self.slots)
            .field("language_maps", &self.language_maps)
            .field("unknown", &self.unknown)
            .finish()
    }
}
