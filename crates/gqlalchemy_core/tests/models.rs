use chrono::TimeDelta;
use gqlalchemy_core::{Node, Relationship, Value};

#[test]
fn node_builder_skips_blank_labels() {
    let node = Node::new()
        .with_label("Person")
        .with_label("  ")
        .with_property("age", 30);

    assert!(node.has_label("Person"));
    assert_eq!(node.labels.len(), 1);
    assert_eq!(node.property("age"), Some(&Value::Int(30)));
    assert_eq!(node.id, None);
}

#[test]
fn relationship_serializes_type_field() {
    let relationship = Relationship::new("KNOWS")
        .between(1, 2)
        .with_property("since", 2019);

    let json = serde_json::to_value(&relationship).unwrap();
    assert_eq!(json["type"], "KNOWS");
    assert_eq!(json["start_node_id"], 1);
    assert_eq!(json["end_node_id"], 2);
    assert_eq!(json["properties"]["since"]["type"], "int");
    assert_eq!(json["properties"]["since"]["value"], 2019);

    let decoded: Relationship = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, relationship);
}

#[test]
fn node_with_temporal_property_survives_serde() {
    let node = Node::new()
        .with_label("Session")
        .with_property("timeout", TimeDelta::milliseconds(1_500))
        .with_property("tags", vec!["a", "b"]);

    let json = serde_json::to_string(&node).unwrap();
    let decoded: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, node);
}

#[test]
fn non_finite_float_property_refuses_to_serialize() {
    let node = Node::new().with_property("score", f64::NAN);
    let err = serde_json::to_string(&node).unwrap_err();
    assert!(err.to_string().contains("non-finite"), "unexpected error: {err}");

    let node = Node::new().with_property("score", f64::INFINITY);
    assert!(serde_json::to_value(&node).is_err());

    let finite = Node::new().with_property("score", 0.5);
    let decoded: Node = serde_json::from_str(&serde_json::to_string(&finite).unwrap()).unwrap();
    assert_eq!(decoded, finite);
}
