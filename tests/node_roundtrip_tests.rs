//! Integration tests for the node engine surface
//!
//! These tests exercise the crate the way the schema walker and editor
//! surfaces do: descriptors in, node trees out, JSON round-trips in
//! both directions.

use paramtree::isodates::{parse_date, parse_date_time};
use paramtree::nodes::ListNode;
use paramtree::{
    build_node, BasicNode, ConstrainedNode, Constraints, Error, ScalarKind, TypeDescriptor,
    TypeNode,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

const ALL_SCALAR_KINDS: [ScalarKind; 9] = [
    ScalarKind::Boolean,
    ScalarKind::Integer,
    ScalarKind::Real,
    ScalarKind::String,
    ScalarKind::Date,
    ScalarKind::Time,
    ScalarKind::Timestamp,
    ScalarKind::Binary,
    ScalarKind::Any,
];

#[test]
fn every_basic_kind_encodes_as_a_string_value_object() {
    let shape = regex::Regex::new(r#"^\{"value":".*"\}$"#).unwrap();
    for kind in ALL_SCALAR_KINDS {
        let descriptor = TypeDescriptor::basic(kind);
        let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
        let encoded = node.to_json().to_string();
        assert!(shape.is_match(&encoded), "kind {}: {}", kind, encoded);
    }
}

#[test]
fn exact_default_encodings() {
    let node = build_node(Some(&TypeDescriptor::basic(ScalarKind::Integer)), None, true)
        .unwrap()
        .unwrap();
    assert_eq!(node.to_json().to_string(), r#"{"value":"0"}"#);

    let node = build_node(Some(&TypeDescriptor::basic(ScalarKind::Real)), None, true)
        .unwrap()
        .unwrap();
    assert_eq!(node.to_json().to_string(), r#"{"value":"0.0"}"#);

    let node = build_node(Some(&TypeDescriptor::basic(ScalarKind::String)), None, true)
        .unwrap()
        .unwrap();
    assert_eq!(node.to_json().to_string(), r#"{"value":""}"#);
}

#[test]
fn iso_date_equivalences() {
    assert_eq!(parse_date("19990807"), parse_date("1999-08-07"));
    assert_eq!(
        parse_date("1999-08-07"),
        chrono::NaiveDate::from_ymd_opt(1999, 8, 7)
    );
    assert_eq!(parse_date("07.08.1999"), None);
}

#[test]
fn iso_date_time_february_clamping() {
    use chrono::TimeZone;
    assert_eq!(
        parse_date_time("2019-02-30T10:20:30Z"),
        Some(chrono::Utc.with_ymd_and_hms(2019, 2, 28, 10, 20, 30).unwrap())
    );
    assert_eq!(
        parse_date_time("2020-02-30T10:20:30Z"),
        Some(chrono::Utc.with_ymd_and_hms(2020, 2, 29, 10, 20, 30).unwrap())
    );
}

#[test]
fn integer_stepping_walks_the_declared_range() {
    let mut node = ConstrainedNode::new(
        ScalarKind::Integer,
        Constraints::new()
            .with_minimal_inclusive("2")
            .with_maximal_inclusive("5"),
        true,
        None,
    )
    .unwrap();

    assert_eq!(node.value(), "2");
    assert_eq!(node.next_value(), Some("3".to_string()));
    assert_eq!(node.previous_value(), None);

    node.set_value("5").unwrap();
    assert_eq!(node.next_value(), None);
    assert_eq!(node.previous_value(), Some("4".to_string()));
}

#[test]
fn exclusive_integer_bounds_start_past_the_bound() {
    let node = ConstrainedNode::new(
        ScalarKind::Integer,
        Constraints::new()
            .with_minimal_exclusive("2")
            .with_maximal_exclusive("6"),
        true,
        None,
    )
    .unwrap();
    assert_eq!(node.value(), "3");
}

#[test]
fn real_stepper_initial_values() {
    let node = ConstrainedNode::new(
        ScalarKind::Real,
        Constraints::new()
            .with_minimal_inclusive("2.2")
            .with_maximal_inclusive("5.5"),
        true,
        None,
    )
    .unwrap();
    let initial: f64 = node.value().parse().unwrap();
    assert!((initial - 2.2).abs() < 1e-5);
    let next: f64 = node.next_value().unwrap().parse().unwrap();
    assert!((next - 2.3).abs() < 1e-5);

    let node = ConstrainedNode::new(
        ScalarKind::Real,
        Constraints::new()
            .with_minimal_exclusive("2.2")
            .with_maximal_exclusive("5.5"),
        true,
        None,
    )
    .unwrap();
    let initial: f64 = node.value().parse().unwrap();
    assert!((initial - 2.201).abs() < 1e-5);
}

#[test]
fn inverted_range_is_an_illegal_range_error() {
    let descriptor = TypeDescriptor::constrained(
        TypeDescriptor::basic(ScalarKind::Integer),
        Constraints::new()
            .with_minimal_inclusive("5")
            .with_maximal_inclusive("2"),
    );
    assert!(matches!(
        build_node(Some(&descriptor), None, true),
        Err(Error::IllegalRange(_))
    ));
}

#[test]
fn fixed_count_list_disables_editing() {
    let list = ListNode::new(
        TypeDescriptor::basic(ScalarKind::Integer),
        &Constraints::new().with_element_count(3),
        true,
        None,
    )
    .unwrap()
    .unwrap();

    assert_eq!(list.len(), 3);
    assert!(!list.can_add());
    assert!(!list.can_remove());
}

#[test]
fn bounded_list_gates_follow_the_size() {
    let mut list = ListNode::new(
        TypeDescriptor::basic(ScalarKind::Integer),
        &Constraints::new()
            .with_minimal_element_count(3)
            .with_maximal_element_count(5),
        true,
        None,
    )
    .unwrap()
    .unwrap();

    assert_eq!(list.len(), 3);
    assert!(list.can_add());
    assert!(!list.can_remove());

    list.add_element().unwrap();
    list.add_element().unwrap();
    assert!(!list.can_add());
}

#[test]
fn factory_output_downcasts_to_the_concrete_node() {
    let descriptor = TypeDescriptor::list(TypeDescriptor::basic(ScalarKind::Integer));
    let mut node = build_node(Some(&descriptor), None, true).unwrap().unwrap();

    let list = node
        .as_any_mut()
        .downcast_mut::<ListNode>()
        .expect("list node");
    assert!(list.can_add());
    list.add_element().unwrap();
    assert_eq!(list.len(), 2);

    let descriptor = TypeDescriptor::basic(ScalarKind::Boolean);
    let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
    assert!(node.as_any().downcast_ref::<BasicNode>().is_some());
}

#[test]
fn empty_child_encodings_are_omitted() {
    // an inner list pinned to zero elements encodes as [], which the
    // outer encoding skips entirely
    let inner = TypeDescriptor::constrained(
        TypeDescriptor::list(TypeDescriptor::basic(ScalarKind::Integer)),
        Constraints::new().with_element_count(0),
    );
    let outer = ListNode::new(inner, &Constraints::new(), true, None)
        .unwrap()
        .unwrap();

    assert_eq!(outer.len(), 1);
    assert_eq!(outer.to_json(), json!([]));
}

#[test]
fn snapshot_round_trip_for_seeded_trees() {
    let descriptor = TypeDescriptor::constrained(
        TypeDescriptor::list(TypeDescriptor::basic(ScalarKind::Real)),
        Constraints::new().with_maximal_element_count(4),
    );
    let prior = json!([{"value": "1.5"}, {"value": "2.25"}]);

    let node = build_node(Some(&descriptor), Some(&prior), true)
        .unwrap()
        .unwrap();
    let snapshot = node.to_json();
    assert_eq!(snapshot, prior);

    let rebuilt = build_node(Some(&descriptor), Some(&snapshot), true)
        .unwrap()
        .unwrap();
    assert_eq!(rebuilt.to_json(), snapshot);
}

#[test]
fn descriptor_schemas_deserialize_from_wire_json() {
    let schema = json!({
        "type": "constrained",
        "inner": {
            "type": "list",
            "element": { "type": "basic", "kind": "timestamp" }
        },
        "constraints": { "minimal_element_count": 1, "maximal_element_count": 3 }
    });

    let descriptor: TypeDescriptor = serde_json::from_value(schema).unwrap();
    let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
    assert_eq!(node.kind().to_string(), "list");
}

proptest! {
    #[test]
    fn prop_basic_and_extended_dates_agree(
        year in 1i32..=9999,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let extended = format!("{:04}-{:02}-{:02}", year, month, day);
        let basic = format!("{:04}{:02}{:02}", year, month, day);
        prop_assert!(parse_date(&extended).is_some());
        prop_assert_eq!(parse_date(&extended), parse_date(&basic));
    }

    #[test]
    fn prop_integer_nodes_round_trip(value in any::<i64>()) {
        let descriptor = TypeDescriptor::basic(ScalarKind::Integer);
        let prior = json!({"value": value.to_string()});
        let node = build_node(Some(&descriptor), Some(&prior), true).unwrap().unwrap();
        let encoded = node.to_json();
        let rebuilt = build_node(Some(&descriptor), Some(&encoded), true).unwrap().unwrap();
        prop_assert_eq!(rebuilt.to_json(), encoded);
    }

    #[test]
    fn prop_real_encodings_are_stable(value in -1e6f64..1e6f64) {
        let descriptor = TypeDescriptor::basic(ScalarKind::Real);
        let prior = json!({"value": format!("{}", value)});
        let node = build_node(Some(&descriptor), Some(&prior), true).unwrap().unwrap();
        let encoded = node.to_json();
        let rebuilt = build_node(Some(&descriptor), Some(&encoded), true).unwrap().unwrap();
        prop_assert_eq!(rebuilt.to_json(), encoded);
    }

    #[test]
    fn prop_integer_lists_round_trip(values in proptest::collection::vec(any::<i64>(), 1..8)) {
        let descriptor = TypeDescriptor::list(TypeDescriptor::basic(ScalarKind::Integer));
        let prior = serde_json::Value::Array(
            values.iter().map(|v| json!({"value": v.to_string()})).collect(),
        );
        let node = build_node(Some(&descriptor), Some(&prior), true).unwrap().unwrap();
        prop_assert_eq!(node.to_json(), prior);
    }
}
