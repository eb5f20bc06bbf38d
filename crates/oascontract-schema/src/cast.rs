//! Casting engine
//!
//! Parameters arrive as text (query strings, path segments, headers, cookies,
//! form fields). [`cast_from_string`] turns that text into the JSON value the
//! schema expects, so it can then be handed to [`validate`](crate::validate).
//!
//! Casting is total. Text that cannot be read as the expected type comes back
//! as a JSON string, and validation then reports the type mismatch.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::node::{SchemaKind, SchemaNode};
use crate::validation::check;
use serde_json::{Map, Number, Value};

/// Cast a raw transport string to a value typed by `node`
///
/// ```rust
/// use oascontract_schema::{cast_from_string, validate, SchemaNode};
/// use serde_json::json;
///
/// let limit = SchemaNode::integer();
/// let value = cast_from_string(&limit, " 42 ");
/// assert_eq!(value, json!(42));
/// assert!(validate(&limit, &value).is_empty());
/// ```
pub fn cast_from_string(node: &SchemaNode, raw: &str) -> Value {
    let trimmed = raw.trim();
    if node.is_nullable() && (trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")) {
        return Value::Null;
    }

    match node.kind() {
        SchemaKind::Integer(_) => parse_integer(trimmed).unwrap_or_else(|| fallback(node, raw)),
        SchemaKind::Number(_) => parse_number(trimmed).unwrap_or_else(|| fallback(node, raw)),
        SchemaKind::Boolean => Value::Bool(!trimmed.eq_ignore_ascii_case("false")),
        SchemaKind::String(_) => match serde_json::from_str::<String>(trimmed) {
            Ok(decoded) => Value::String(decoded),
            Err(_) => Value::String(raw.to_string()),
        },
        SchemaKind::Array(schema) => match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(items) => Value::Array(items.into_iter().map(|item| cast_value(schema.items(), item)).collect()),
            Err(_) if trimmed.is_empty() => Value::Array(Vec::new()),
            Err(_) => Value::Array(
                trimmed
                    .split(',')
                    .map(|item| cast_from_string(schema.items(), item))
                    .collect(),
            ),
        },
        SchemaKind::Map(_) | SchemaKind::Object(_) => match decode_object(trimmed) {
            Some(entries) => cast_value(node, Value::Object(entries)),
            None => fallback(node, trimmed),
        },
        SchemaKind::Composite(_) => match decode_object(trimmed) {
            Some(entries) => cast_value(node, Value::Object(entries)),
            None => first_valid_member(node, |member| cast_from_string(member, raw))
                .unwrap_or_else(|| fallback(node, trimmed)),
        },
        SchemaKind::Reference(reference) => cast_from_string(reference.resolved(), raw),
    }
}

/// Cast the string leaves of an already decoded value
///
/// Used for values that came out of JSON but may still carry text where the
/// schema wants a number or boolean, e.g. a JSON-encoded query object.
/// Entries without a declared schema pass through unchanged.
pub fn cast_value(node: &SchemaNode, value: Value) -> Value {
    if value.is_null() {
        return value;
    }

    match (node.kind(), value) {
        (SchemaKind::Reference(reference), value) => cast_value(reference.resolved(), value),
        (SchemaKind::String(_), value) => value,
        (_, Value::String(raw)) => cast_from_string(node, &raw),
        (SchemaKind::Array(schema), Value::Array(items)) => {
            Value::Array(items.into_iter().map(|item| cast_value(schema.items(), item)).collect())
        }
        (SchemaKind::Map(schema), Value::Object(entries)) => Value::Object(
            entries
                .into_iter()
                .map(|(key, entry)| (key, cast_value(schema.values(), entry)))
                .collect(),
        ),
        (SchemaKind::Object(schema), Value::Object(entries)) => Value::Object(
            entries
                .into_iter()
                .map(|(key, entry)| {
                    let entry = match schema.properties().get(&key) {
                        Some(property) => cast_value(property, entry),
                        None => entry,
                    };
                    (key, entry)
                })
                .collect(),
        ),
        (SchemaKind::Composite(schema), Value::Object(entries)) => Value::Object(
            entries
                .into_iter()
                .map(|(key, entry)| {
                    let declared = schema.members().iter().find_map(|(_, member)| member.property(&key));
                    let entry = match declared {
                        Some(property) => cast_value(property, entry),
                        None => entry,
                    };
                    (key, entry)
                })
                .collect(),
        ),
        (SchemaKind::Composite(_), value) => {
            first_valid_member(node, |member| cast_value(member, value.clone())).unwrap_or(value)
        }
        (_, value) => value,
    }
}

fn parse_integer(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::from(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(Value::from(n));
    }
    // Fractions stay numbers so validation can report the wrong type.
    parse_number(text)
}

fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::from(n));
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(entries)) => Some(entries),
        _ => None,
    }
}

/// First member (declaration order) whose cast of the input validates
fn first_valid_member<F>(node: &SchemaNode, cast: F) -> Option<Value>
where
    F: Fn(&SchemaNode) -> Value,
{
    let SchemaKind::Composite(schema) = node.kind() else {
        return None;
    };
    schema.members().iter().find_map(|(name, member)| {
        let value = cast(member);
        if check(member, &value).is_empty() {
            tracing::trace!(member = name, "Composite cast matched member");
            Some(value)
        } else {
            None
        }
    })
}

fn fallback(node: &SchemaNode, raw: &str) -> Value {
    tracing::debug!(schema = node.type_name(), "Could not cast input; keeping it as a string");
    Value::String(raw.to_string())
}
