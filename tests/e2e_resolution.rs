//! End-to-end tests for polymorphic value resolution.
//!
//! Priority order, capability-filtered type lookup, fallback to Unknown,
//! and the hard errors a top-level decode can raise.

use astreams_rs::schema::Alternative::{Scalar, Typed};
use astreams_rs::{
    vocab, Alternative, Capability, Codec, Error, PropertySpec, PropertyValue, ScalarKind,
    TypeRegistry, TypeSchema, Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Helper: a gauge type whose `reading` admits integer before string, and
// whose `label` admits string before integer.
// ============================================================================

const INTEGER_THEN_STRING: &[Alternative] = &[Scalar(ScalarKind::NonNegativeInteger), Scalar(ScalarKind::String)];
const STRING_THEN_INTEGER: &[Alternative] = &[Scalar(ScalarKind::String), Scalar(ScalarKind::NonNegativeInteger)];

const GAUGE_PROPS: &[PropertySpec] = &[
    PropertySpec::functional("reading", INTEGER_THEN_STRING),
    PropertySpec::functional("label", STRING_THEN_INTEGER),
    PropertySpec::non_functional("sample", &[Typed(Capability::Link), Typed(Capability::Object)]),
];

static GAUGE: TypeSchema = TypeSchema {
    name: "Gauge",
    capabilities: &[Capability::Object],
    properties: &[GAUGE_PROPS],
};

fn gauge_codec() -> Codec<TypeRegistry> {
    let mut registry = vocab::registry().clone();
    registry.register(&GAUGE);
    Codec::with_resolver(registry)
}

fn tree(v: serde_json::Value) -> Value {
    Value::from(v)
}

// ============================================================================
// 1. Priority determinism
// ============================================================================

#[test]
fn test_literal_valid_under_two_kinds_takes_first() {
    let codec = gauge_codec();
    let input = tree(json!({"type": "Gauge", "reading": "42", "label": "42"}));

    for _ in 0..100 {
        let gauge = codec.deserialize(&input).unwrap();
        assert_eq!(gauge.get("reading"), Some(&PropertyValue::NonNegativeInteger(42)));
        assert_eq!(gauge.get("label"), Some(&PropertyValue::String("42".into())));
    }
}

#[test]
fn test_lower_priority_kind_still_reachable() {
    let codec = gauge_codec();
    let gauge = codec.deserialize(&tree(json!({"type": "Gauge", "reading": "high"}))).unwrap();
    assert_eq!(gauge.get("reading"), Some(&PropertyValue::String("high".into())));
}

#[test]
fn test_typed_alternatives_tried_in_declared_order() {
    let codec = gauge_codec();
    let gauge = codec
        .deserialize(&tree(json!({
            "type": "Gauge",
            "sample": [{"type": "Mention"}, {"type": "Note"}]
        })))
        .unwrap();

    let samples = gauge.values("sample");
    assert_eq!(samples[0].alternative(), Some(Typed(Capability::Link)));
    assert_eq!(samples[1].alternative(), Some(Typed(Capability::Object)));
    assert_eq!(samples[1].as_entity().map(|e| e.type_name()), Some("Note"));
}

// ============================================================================
// 2. Capability-specific fallback
// ============================================================================

#[test]
fn test_unregistered_type_in_map_stays_unknown() {
    let codec = Codec::activity_streams();
    let widget = json!({"type": "Widget", "id": "https://example.com/w/1"});
    let note = codec
        .deserialize(&tree(json!({"type": "Note", "attachment": widget.clone()})))
        .unwrap();

    // never coerced to the identifier alternative
    assert_eq!(note.values("attachment"), &[PropertyValue::Unknown(tree(widget))]);
}

#[test]
fn test_type_without_required_capability_stays_unknown() {
    let codec = Codec::activity_streams();
    // `icon` wants an Image or a Link; a Note is neither
    let person = codec
        .deserialize(&tree(json!({"type": "Person", "icon": {"type": "Note"}})))
        .unwrap();
    assert!(person.values("icon")[0].is_unknown());
}

#[test]
fn test_mention_resolves_as_link() {
    let codec = Codec::activity_streams();
    let note = codec
        .deserialize(&tree(json!({
            "type": "Note",
            "tag": {"type": "Mention", "href": "https://example.com/users/bob"}
        })))
        .unwrap();

    let tag = &note.values("tag")[0];
    assert_eq!(tag.alternative(), Some(Typed(Capability::Link)));
    let mention = tag.as_entity().unwrap();
    assert_eq!(mention.type_name(), "Mention");
    assert_eq!(tag.reference(), None);
    assert_eq!(mention.get("href").and_then(PropertyValue::as_iri).map(|i| i.as_str()), Some("https://example.com/users/bob"));
}

#[test]
fn test_extension_token_before_known_token() {
    let codec = Codec::activity_streams();
    let note = codec
        .deserialize(&tree(json!({
            "type": "Create",
            "object": {"type": ["x:Poll", "Question"], "id": "https://example.com/q/1"}
        })))
        .unwrap();

    let object = note.values("object")[0].as_entity().unwrap();
    assert_eq!(object.type_name(), "Question");
    assert_eq!(object.types(), &["x:Poll".to_owned(), "Question".to_owned()]);
    assert_eq!(note.values("object")[0].reference().map(|i| i.as_str()), Some("https://example.com/q/1"));
}

#[test]
fn test_question_closed_priority() {
    let codec = Codec::activity_streams();
    let q = codec
        .deserialize(&tree(json!({
            "type": "Question",
            "closed": ["2024-06-01T00:00:00Z", true, "https://example.com/x"]
        })))
        .unwrap();
    let closed: Vec<_> = q.values("closed").iter().map(|v| v.alternative()).collect();
    assert_eq!(
        closed,
        vec![
            Some(Scalar(ScalarKind::DateTime)),
            Some(Scalar(ScalarKind::Boolean)),
            Some(Scalar(ScalarKind::Iri)),
        ]
    );
}

// ============================================================================
// 3. Errors
// ============================================================================

#[test]
fn test_map_where_no_object_is_admitted() {
    let codec = Codec::activity_streams();
    let err = codec
        .deserialize(&tree(json!({"type": "Note", "sensitive": {"type": "Note"}})))
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedObject { ref property } if property == "sensitive"));
}

#[test]
fn test_committed_embedded_failure_propagates() {
    let codec = Codec::activity_streams();
    let err = codec
        .deserialize(&tree(json!({
            "type": "Create",
            "object": {"type": "Note", "contentMap": ["not", "a", "map"]}
        })))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLanguageMap { ref property, .. } if property == "content"));
}

#[test]
fn test_top_level_errors() {
    let codec = Codec::activity_streams();
    assert!(matches!(codec.deserialize(&Value::from("Note")), Err(Error::NotAnObject { got: "string" })));
    assert!(matches!(codec.deserialize(&tree(json!({"id": "https://e.com/1"}))), Err(Error::MissingType)));
    assert!(matches!(codec.deserialize(&tree(json!({"type": "Widget"}))), Err(Error::UnresolvedType(_))));
    assert!(matches!(
        codec.deserialize(&tree(json!({"type": 5}))),
        Err(Error::InvalidTypeToken { ref got }) if got == "integer"
    ));
    assert!(matches!(
        codec.deserialize(&tree(json!({"type": ["Note", null]}))),
        Err(Error::InvalidTypeToken { .. })
    ));
    assert!(matches!(codec.from_json_str("{not json"), Err(Error::Json(_))));
}

#[test]
fn test_decode_as_ignores_type_field() {
    let codec = Codec::activity_streams();
    let page = codec
        .decode_as(&vocab::PAGE, &tree(json!({"type": "x:WebPage", "width": 800})))
        .unwrap();
    assert_eq!(page.type_name(), "Page");
    assert_eq!(page.get("width").and_then(PropertyValue::as_u64), Some(800));
    assert_eq!(codec.serialize(&page), tree(json!({"type": ["x:WebPage", "Page"], "width": 800})));
}
