//! End-to-end tests for unknown-field passthrough.
//!
//! Undeclared keys, unparseable literals and unregistered embedded types
//! all come back out exactly as they went in.

use astreams_rs::{vocab, Codec, CodecConfig, Entity, Error, PropertyValue, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn tree(v: serde_json::Value) -> Value {
    Value::from(v)
}

#[test]
fn test_custom_key_passthrough() {
    let codec = Codec::activity_streams();
    let input = tree(json!({"type": "Note", "x-custom": {"a": 1}}));
    let note = codec.deserialize(&input).unwrap();

    assert_eq!(note.unknown().get("x-custom"), Some(&tree(json!({"a": 1}))));
    assert_eq!(codec.serialize(&note), input);
}

#[test]
fn test_context_never_bagged() {
    let codec = Codec::activity_streams();
    let note = codec
        .deserialize(&tree(json!({
            "@context": ["https://www.w3.org/ns/activitystreams", {"toot": "http://joinmastodon.org/ns#"}],
            "type": "Note"
        })))
        .unwrap();

    assert!(!note.unknown().contains_key("@context"));
    assert!(note.unknown().is_empty());
    assert_eq!(codec.serialize(&note), tree(json!({"type": "Note"})));
}

#[test]
fn test_context_emitted_on_request() {
    let config = CodecConfig { emit_context: true, ..CodecConfig::default() };
    let codec = Codec::activity_streams().with_config(config);
    let note = Entity::new(&vocab::NOTE);
    assert_eq!(
        codec.serialize(&note),
        tree(json!({"@context": "https://www.w3.org/ns/activitystreams", "type": "Note"}))
    );
}

#[test]
fn test_unknown_values_inside_declared_properties() {
    let codec = Codec::activity_streams();
    let input = tree(json!({
        "type": "Note",
        "published": "yesterday",
        "to": ["https://example.com/u", {"name": "untyped"}, null, [1, 2]],
        "mediaType": 7
    }));
    let note = codec.deserialize(&input).unwrap();

    assert_eq!(note.get("published"), Some(&PropertyValue::Unknown(Value::from("yesterday"))));
    let to = note.values("to");
    assert_eq!(to.len(), 4);
    assert!(to[0].as_iri().is_some());
    assert!(to[1..].iter().all(PropertyValue::is_unknown));
    assert_eq!(note.get("mediaType"), Some(&PropertyValue::Unknown(Value::Int(7))));

    assert_eq!(codec.serialize(&note), input);
}

#[test]
fn test_functional_property_fed_a_list() {
    let codec = Codec::activity_streams();
    let input = tree(json!({"type": "Image", "width": [1, 2]}));
    let image = codec.deserialize(&input).unwrap();
    assert_eq!(image.get("width"), Some(&PropertyValue::Unknown(tree(json!([1, 2])))));
    assert_eq!(codec.serialize(&image), input);
}

#[test]
fn test_set_unknown_refuses_claimed_keys() {
    let mut note = Entity::new(&vocab::NOTE);
    for key in ["id", "type", "@context", "content", "contentMap"] {
        assert!(matches!(note.set_unknown(key, Value::Null), Err(Error::ReservedKey(_))), "{key}");
    }
    assert_eq!(note.set_unknown("x-a", Value::Bool(true)).unwrap(), None);
    assert_eq!(note.remove_unknown("x-a"), Some(Value::Bool(true)));
}
