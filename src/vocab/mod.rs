//! # ActivityStreams vocabulary
//!
//! The core ActivityStreams 2.0 types plus the ActivityPub actor
//! endpoints, expressed as [`TypeSchema`] tables. A type inherits by
//! listing its ancestors' property groups before its own.
//!
//! [`registry()`] is the process-wide default [`TypeRegistry`], built on
//! first use and read-only afterwards. Applications with extension types
//! clone it, register their own schemas, and hand the copy to a
//! [`crate::Codec`].

pub mod properties;

use std::sync::OnceLock;

use crate::registry::TypeRegistry;
use crate::schema::{Capability, PropertySpec, TypeSchema};
use properties as p;

/// The ActivityStreams JSON-LD context IRI.
pub const NAMESPACE: &str = "https://www.w3.org/ns/activitystreams";

/// The special public-addressing collection.
pub const PUBLIC: &str = "https://www.w3.org/ns/activitystreams#Public";

const OBJECT_CAPS: &[Capability] = &[Capability::Object];
const IMAGE_CAPS: &[Capability] = &[Capability::Object, Capability::Image];
const LINK_CAPS: &[Capability] = &[Capability::Link];
const COLLECTION_CAPS: &[Capability] = &[Capability::Object, Capability::Collection];
const ORDERED_COLLECTION_CAPS: &[Capability] =
    &[Capability::Object, Capability::Collection, Capability::OrderedCollection];
const PAGE_CAPS: &[Capability] = &[Capability::Object, Capability::Collection, Capability::CollectionPage];
const ORDERED_PAGE_CAPS: &[Capability] = &[
    Capability::Object,
    Capability::Collection,
    Capability::OrderedCollection,
    Capability::CollectionPage,
];

const OBJECT_GROUPS: &[&[PropertySpec]] = &[p::OBJECT];
const DOCUMENT_GROUPS: &[&[PropertySpec]] = &[p::OBJECT, p::DOCUMENT];
const ACTIVITY_GROUPS: &[&[PropertySpec]] = &[p::OBJECT, p::ACTIVITY, p::TRANSITIVE];
const ACTOR_GROUPS: &[&[PropertySpec]] = &[p::OBJECT, p::ACTOR];

const fn object_type(name: &'static str) -> TypeSchema {
    TypeSchema { name, capabilities: OBJECT_CAPS, properties: OBJECT_GROUPS }
}

const fn document_type(name: &'static str) -> TypeSchema {
    TypeSchema { name, capabilities: OBJECT_CAPS, properties: DOCUMENT_GROUPS }
}

const fn activity_type(name: &'static str) -> TypeSchema {
    TypeSchema { name, capabilities: OBJECT_CAPS, properties: ACTIVITY_GROUPS }
}

const fn actor_type(name: &'static str) -> TypeSchema {
    TypeSchema { name, capabilities: OBJECT_CAPS, properties: ACTOR_GROUPS }
}

// ============================================================================
// Objects and links
// ============================================================================

pub static OBJECT: TypeSchema = object_type("Object");
pub static NOTE: TypeSchema = object_type("Note");
pub static ARTICLE: TypeSchema = object_type("Article");
pub static EVENT: TypeSchema = object_type("Event");

pub static DOCUMENT: TypeSchema = document_type("Document");
pub static AUDIO: TypeSchema = document_type("Audio");
pub static VIDEO: TypeSchema = document_type("Video");
pub static PAGE: TypeSchema = document_type("Page");
pub static IMAGE: TypeSchema = TypeSchema {
    name: "Image",
    capabilities: IMAGE_CAPS,
    properties: DOCUMENT_GROUPS,
};

pub static PLACE: TypeSchema = TypeSchema {
    name: "Place",
    capabilities: OBJECT_CAPS,
    properties: &[p::OBJECT, p::PLACE],
};

pub static TOMBSTONE: TypeSchema = TypeSchema {
    name: "Tombstone",
    capabilities: OBJECT_CAPS,
    properties: &[p::OBJECT, p::TOMBSTONE],
};

pub static LINK: TypeSchema = TypeSchema { name: "Link", capabilities: LINK_CAPS, properties: &[p::LINK] };
pub static MENTION: TypeSchema = TypeSchema { name: "Mention", capabilities: LINK_CAPS, properties: &[p::LINK] };

// ============================================================================
// Collections
// ============================================================================

pub static COLLECTION: TypeSchema = TypeSchema {
    name: "Collection",
    capabilities: COLLECTION_CAPS,
    properties: &[p::OBJECT, p::COLLECTION, p::ITEMS],
};

pub static ORDERED_COLLECTION: TypeSchema = TypeSchema {
    name: "OrderedCollection",
    capabilities: ORDERED_COLLECTION_CAPS,
    properties: &[p::OBJECT, p::COLLECTION, p::ORDERED_ITEMS],
};

pub static COLLECTION_PAGE: TypeSchema = TypeSchema {
    name: "CollectionPage",
    capabilities: PAGE_CAPS,
    properties: &[p::OBJECT, p::COLLECTION, p::ITEMS, p::COLLECTION_PAGE],
};

pub static ORDERED_COLLECTION_PAGE: TypeSchema = TypeSchema {
    name: "OrderedCollectionPage",
    capabilities: ORDERED_PAGE_CAPS,
    properties: &[p::OBJECT, p::COLLECTION, p::ORDERED_ITEMS, p::COLLECTION_PAGE, p::ORDERED_COLLECTION_PAGE],
};

// ============================================================================
// Activities
// ============================================================================

pub static ACTIVITY: TypeSchema = activity_type("Activity");
pub static CREATE: TypeSchema = activity_type("Create");
pub static UPDATE: TypeSchema = activity_type("Update");
pub static DELETE: TypeSchema = activity_type("Delete");
pub static FOLLOW: TypeSchema = activity_type("Follow");
pub static ACCEPT: TypeSchema = activity_type("Accept");
pub static REJECT: TypeSchema = activity_type("Reject");
pub static ANNOUNCE: TypeSchema = activity_type("Announce");
pub static LIKE: TypeSchema = activity_type("Like");
pub static UNDO: TypeSchema = activity_type("Undo");

pub static INTRANSITIVE_ACTIVITY: TypeSchema = TypeSchema {
    name: "IntransitiveActivity",
    capabilities: OBJECT_CAPS,
    properties: &[p::OBJECT, p::ACTIVITY],
};

pub static QUESTION: TypeSchema = TypeSchema {
    name: "Question",
    capabilities: OBJECT_CAPS,
    properties: &[p::OBJECT, p::ACTIVITY, p::QUESTION],
};

// ============================================================================
// Actors
// ============================================================================

pub static APPLICATION: TypeSchema = actor_type("Application");
pub static GROUP: TypeSchema = actor_type("Group");
pub static ORGANIZATION: TypeSchema = actor_type("Organization");
pub static PERSON: TypeSchema = actor_type("Person");
pub static SERVICE: TypeSchema = actor_type("Service");

/// Every type this module defines.
pub static ALL: &[&TypeSchema] = &[
    &OBJECT, &NOTE, &ARTICLE, &EVENT,
    &DOCUMENT, &AUDIO, &VIDEO, &PAGE, &IMAGE,
    &PLACE, &TOMBSTONE, &LINK, &MENTION,
    &COLLECTION, &ORDERED_COLLECTION, &COLLECTION_PAGE, &ORDERED_COLLECTION_PAGE,
    &ACTIVITY, &CREATE, &UPDATE, &DELETE, &FOLLOW, &ACCEPT, &REJECT, &ANNOUNCE, &LIKE, &UNDO,
    &INTRANSITIVE_ACTIVITY, &QUESTION,
    &APPLICATION, &GROUP, &ORGANIZATION, &PERSON, &SERVICE,
];

/// The default registry holding every type in [`ALL`].
pub fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| ALL.iter().copied().collect())
}
