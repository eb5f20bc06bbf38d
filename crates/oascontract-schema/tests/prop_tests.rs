//! Property-based tests for validation and casting
//!
//! These tests check that the engines behave correctly across a wide range
//! of generated values and schemas.

use oascontract_schema::{
    cast_from_string, validate, ArraySchema, ErrorKind, IntegerSchema, SchemaNode, StringSchema,
};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-zA-Z_][a-zA-Z0-9_]{0,20}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating schema nodes of every shape
fn schema_strategy() -> impl Strategy<Value = SchemaNode> {
    let leaf = prop_oneof![
        Just(SchemaNode::string()),
        Just(SchemaNode::integer()),
        Just(SchemaNode::number()),
        Just(SchemaNode::boolean()),
        (0usize..5, 5usize..20).prop_map(|(min, max)| {
            SchemaNode::new(StringSchema::new().min_length(min).max_length(max)).unwrap()
        }),
    ];

    leaf.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaNode::array),
            inner.clone().prop_map(SchemaNode::map),
            proptest::collection::vec(inner.clone(), 1..4).prop_map(|properties| {
                let named = properties
                    .into_iter()
                    .enumerate()
                    .map(|(i, node)| node.named(format!("field_{}", i)));
                SchemaNode::object_from(named).unwrap()
            }),
            proptest::collection::vec(inner, 1..3).prop_map(|members| SchemaNode::any_of(members).unwrap()),
        ]
    })
}

proptest! {
    #[test]
    fn prop_nullable_accepts_null(node in schema_strategy()) {
        let nullable = node.nullable().unwrap();
        prop_assert!(validate(&nullable, &Value::Null).is_empty());
    }

    #[test]
    fn prop_validation_never_panics(node in schema_strategy(), value in json_value_strategy()) {
        let _ = validate(&node, &value);
    }

    #[test]
    fn prop_cast_never_panics(node in schema_strategy(), raw in ".{0,40}") {
        let _ = cast_from_string(&node, &raw);
    }

    #[test]
    fn prop_integer_cast_round_trip(n in any::<i64>()) {
        let node = SchemaNode::integer();
        let value = cast_from_string(&node, &n.to_string());
        prop_assert_eq!(value.as_i64(), Some(n));
        prop_assert!(validate(&node, &value).is_empty());
    }

    #[test]
    fn prop_integer_bounds(min in -1000i64..1000, n in -2000i64..2000) {
        let node = SchemaNode::new(IntegerSchema::new().minimum(min)).unwrap();
        let errors = validate(&node, &cast_from_string(&node, &n.to_string()));
        if n < min {
            prop_assert_eq!(errors.len(), 1);
            prop_assert_eq!(errors[0].kind(), ErrorKind::LessThanMinimum);
        } else {
            prop_assert!(errors.is_empty());
        }
    }

    #[test]
    fn prop_object_rejects_undeclared_keys(key in "[a-z]{1,10}") {
        prop_assume!(key != "id");
        let node = SchemaNode::object_from([SchemaNode::string().named("id")]).unwrap();
        let mut value = serde_json::Map::new();
        value.insert(key, Value::from(1));

        let errors = validate(&node, &Value::Object(value));
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(errors[0].kind(), ErrorKind::KeyNotPartOfObject);
        prop_assert!(!errors[0].is_field());
    }

    #[test]
    fn prop_array_item_count(len in 0usize..10, min in 0usize..10) {
        let node = SchemaNode::new(ArraySchema::new(SchemaNode::boolean()).min_items(min)).unwrap();
        let value = Value::Array(vec![Value::Bool(true); len]);
        let errors = validate(&node, &value);
        prop_assert_eq!(errors.is_empty(), len >= min);
    }
}
