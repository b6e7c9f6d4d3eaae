//! Property groups shared by the vocabulary types.
//!
//! Alternatives are listed in resolution priority order.

use crate::schema::{Alternative, Capability, PropertySpec, ScalarKind};

use crate::schema::Alternative::{Scalar, Typed};

const IRI: Alternative = Scalar(ScalarKind::Iri);

const OBJECT_LINK_IRI: &[Alternative] = &[Typed(Capability::Object), Typed(Capability::Link), IRI];
const LINK_OBJECT_IRI: &[Alternative] = &[Typed(Capability::Link), Typed(Capability::Object), IRI];
const IMAGE_LINK_IRI: &[Alternative] = &[Typed(Capability::Image), Typed(Capability::Link), IRI];
const PAGE_LINK_IRI: &[Alternative] = &[Typed(Capability::CollectionPage), Typed(Capability::Link), IRI];
const COLLECTION_IRI: &[Alternative] = &[Typed(Capability::Collection), IRI];
const ORDERED_COLLECTION_IRI: &[Alternative] = &[Typed(Capability::OrderedCollection), IRI];
const TEXT: &[Alternative] = &[Scalar(ScalarKind::String)];
const DATE_TIME_IRI: &[Alternative] = &[Scalar(ScalarKind::DateTime), IRI];
const INTEGER_IRI: &[Alternative] = &[Scalar(ScalarKind::NonNegativeInteger), IRI];
const FLOAT_IRI: &[Alternative] = &[Scalar(ScalarKind::Float), IRI];
const MIME_IRI: &[Alternative] = &[Scalar(ScalarKind::MimeType), IRI];

pub const OBJECT: &[PropertySpec] = &[
    PropertySpec::non_functional("attachment", OBJECT_LINK_IRI),
    PropertySpec::non_functional("attributedTo", OBJECT_LINK_IRI),
    PropertySpec::non_functional("audience", OBJECT_LINK_IRI),
    PropertySpec::non_functional("bcc", OBJECT_LINK_IRI),
    PropertySpec::non_functional("bto", OBJECT_LINK_IRI),
    PropertySpec::non_functional("cc", OBJECT_LINK_IRI),
    PropertySpec::non_functional("content", TEXT).with_language_map(),
    PropertySpec::non_functional("context", OBJECT_LINK_IRI),
    PropertySpec::functional("duration", &[Scalar(ScalarKind::Duration), IRI]),
    PropertySpec::functional("endTime", DATE_TIME_IRI),
    PropertySpec::non_functional("generator", OBJECT_LINK_IRI),
    PropertySpec::non_functional("icon", IMAGE_LINK_IRI),
    PropertySpec::non_functional("image", IMAGE_LINK_IRI),
    PropertySpec::non_functional("inReplyTo", OBJECT_LINK_IRI),
    PropertySpec::functional("likes", COLLECTION_IRI),
    PropertySpec::non_functional("location", OBJECT_LINK_IRI),
    PropertySpec::functional("mediaType", MIME_IRI),
    PropertySpec::non_functional("name", TEXT).with_language_map(),
    PropertySpec::non_functional("preview", LINK_OBJECT_IRI),
    PropertySpec::functional("published", DATE_TIME_IRI),
    PropertySpec::functional("replies", COLLECTION_IRI),
    PropertySpec::functional("sensitive", &[Scalar(ScalarKind::Boolean)]),
    PropertySpec::functional("shares", COLLECTION_IRI),
    PropertySpec::functional("source", &[Typed(Capability::Object), IRI]),
    PropertySpec::functional("startTime", DATE_TIME_IRI),
    PropertySpec::non_functional("summary", TEXT).with_language_map(),
    PropertySpec::non_functional("tag", OBJECT_LINK_IRI),
    PropertySpec::non_functional("to", OBJECT_LINK_IRI),
    PropertySpec::functional("updated", DATE_TIME_IRI),
    PropertySpec::non_functional("url", &[Typed(Capability::Link), IRI]),
];

pub const LINK: &[PropertySpec] = &[
    PropertySpec::non_functional("attributedTo", OBJECT_LINK_IRI),
    PropertySpec::functional("height", INTEGER_IRI),
    PropertySpec::functional("href", &[IRI]),
    PropertySpec::functional("hreflang", &[Scalar(ScalarKind::LanguageTag), IRI]),
    PropertySpec::functional("mediaType", MIME_IRI),
    PropertySpec::non_functional("name", TEXT).with_language_map(),
    PropertySpec::non_functional("preview", LINK_OBJECT_IRI),
    PropertySpec::non_functional("rel", TEXT),
    PropertySpec::functional("width", INTEGER_IRI),
];

/// Pixel dimensions of documents.
pub const DOCUMENT: &[PropertySpec] = &[
    PropertySpec::functional("height", INTEGER_IRI),
    PropertySpec::functional("width", INTEGER_IRI),
];

pub const PLACE: &[PropertySpec] = &[
    PropertySpec::functional("accuracy", FLOAT_IRI),
    PropertySpec::functional("altitude", FLOAT_IRI),
    PropertySpec::functional("latitude", FLOAT_IRI),
    PropertySpec::functional("longitude", FLOAT_IRI),
    PropertySpec::functional("radius", FLOAT_IRI),
    PropertySpec::functional("units", &[Scalar(ScalarKind::Units), IRI]),
];

pub const TOMBSTONE: &[PropertySpec] = &[
    PropertySpec::functional("deleted", DATE_TIME_IRI),
    PropertySpec::non_functional("formerType", &[Typed(Capability::Object), IRI, Scalar(ScalarKind::String)]),
];

pub const COLLECTION: &[PropertySpec] = &[
    PropertySpec::functional("current", PAGE_LINK_IRI),
    PropertySpec::functional("first", PAGE_LINK_IRI),
    PropertySpec::functional("last", PAGE_LINK_IRI),
    PropertySpec::functional("totalItems", INTEGER_IRI),
];

pub const ITEMS: &[PropertySpec] = &[PropertySpec::non_functional("items", OBJECT_LINK_IRI)];

pub const ORDERED_ITEMS: &[PropertySpec] = &[PropertySpec::non_functional("orderedItems", OBJECT_LINK_IRI)];

pub const COLLECTION_PAGE: &[PropertySpec] = &[
    PropertySpec::functional("next", PAGE_LINK_IRI),
    PropertySpec::functional("partOf", &[Typed(Capability::Link), Typed(Capability::Collection), IRI]),
    PropertySpec::functional("prev", PAGE_LINK_IRI),
];

pub const ORDERED_COLLECTION_PAGE: &[PropertySpec] = &[PropertySpec::functional("startIndex", INTEGER_IRI)];

/// Properties of every activity, transitive or not.
pub const ACTIVITY: &[PropertySpec] = &[
    PropertySpec::non_functional("actor", OBJECT_LINK_IRI),
    PropertySpec::non_functional("instrument", OBJECT_LINK_IRI),
    PropertySpec::non_functional("origin", OBJECT_LINK_IRI),
    PropertySpec::non_functional("result", OBJECT_LINK_IRI),
    PropertySpec::non_functional("target", OBJECT_LINK_IRI),
];

pub const TRANSITIVE: &[PropertySpec] = &[PropertySpec::non_functional("object", OBJECT_LINK_IRI)];

pub const QUESTION: &[PropertySpec] = &[
    PropertySpec::non_functional("anyOf", OBJECT_LINK_IRI),
    // a date when it closed, or just whether it has
    PropertySpec::non_functional(
        "closed",
        &[Scalar(ScalarKind::DateTime), Scalar(ScalarKind::Boolean), Typed(Capability::Object), Typed(Capability::Link), IRI],
    ),
    PropertySpec::non_functional("oneOf", OBJECT_LINK_IRI),
];

/// ActivityPub actor endpoints.
pub const ACTOR: &[PropertySpec] = &[
    PropertySpec::functional("followers", COLLECTION_IRI),
    PropertySpec::functional("following", COLLECTION_IRI),
    PropertySpec::functional("inbox", ORDERED_COLLECTION_IRI),
    PropertySpec::functional("liked", COLLECTION_IRI),
    PropertySpec::functional("outbox", ORDERED_COLLECTION_IRI),
    PropertySpec::functional("preferredUsername", TEXT).with_language_map(),
];
