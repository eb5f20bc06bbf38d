//! Array, map and object validators
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{check, check_within};
use super::error::{ErrorKind, ValidationError};
use super::primitive::type_mismatch;
use crate::node::{ArraySchema, MapSchema};
use crate::registry::ComponentRegistry;
use serde_json::Value;

pub(crate) fn check_array(schema: &ArraySchema, value: &Value) -> Vec<ValidationError> {
    let items = match value.as_array() {
        Some(items) => items,
        None => return vec![type_mismatch("array", value)],
    };

    let mut errors = Vec::new();
    let count = items.len();
    if let Some(min) = schema.min_items {
        if count < min {
            errors.push(ValidationError::plain(
                ErrorKind::LessThanMinimumItems,
                format!("Array has {} item(s), fewer than the minimum of {}", count, min),
            ));
        }
    }
    if let Some(max) = schema.max_items {
        if count > max {
            errors.push(ValidationError::plain(
                ErrorKind::MoreThanMaximumItems,
                format!("Array has {} item(s), more than the maximum of {}", count, max),
            ));
        }
    }

    if schema.unique_items {
        if let Some((first, duplicate)) = first_duplicate(items) {
            errors.push(ValidationError::plain(
                ErrorKind::DuplicateItems,
                format!("Array items must be unique: item {} repeats item {}", duplicate, first),
            ));
        }
    }

    for (index, item) in items.iter().enumerate() {
        errors.extend(check(schema.items(), item).into_iter().map(|e| e.scoped(index)));
    }

    errors
}

fn first_duplicate(items: &[Value]) -> Option<(usize, usize)> {
    for (later, item) in items.iter().enumerate() {
        if let Some(earlier) = items[..later].iter().position(|seen| json_equal(seen, item)) {
            return Some((earlier, later));
        }
    }
    None
}

/// JSON equality: numbers compare by value, so `1` equals `1.0`
fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(a), Some(b)) => a == b,
                _ => a.as_f64() == b.as_f64(),
            },
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| json_equal(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| json_equal(a, b)))
        }
        _ => left == right,
    }
}

/// Map values are checked against the value schema. Keys are data, not
/// schema, so they do not become path segments; the map's own name or the
/// enclosing property locates the errors.
pub(crate) fn check_map(schema: &MapSchema, value: &Value) -> Vec<ValidationError> {
    let entries = match value.as_object() {
        Some(entries) => entries,
        None => return vec![type_mismatch("object", value)],
    };

    entries
        .values()
        .flat_map(|entry| check(schema.values(), entry))
        .collect()
}

/// Required pass, then a pass over the keys present in the value
pub(crate) fn check_object(properties: &ComponentRegistry, value: &Value) -> Vec<ValidationError> {
    let entries = match value.as_object() {
        Some(entries) => entries,
        None => return vec![type_mismatch("object", value)],
    };

    let mut errors = Vec::new();
    for (name, property) in properties.iter() {
        if property.is_required() && !entries.contains_key(name) {
            errors.push(ValidationError::field(
                [name],
                ErrorKind::IsRequiredField,
                format!("Required field '{}' is missing", name),
            ));
        }
    }

    for (key, entry) in entries {
        match properties.get(key) {
            Some(property) => {
                errors.extend(check_within(property, entry).into_iter().map(|e| e.scoped(key.as_str())));
            }
            None => errors.push(ValidationError::plain(
                ErrorKind::KeyNotPartOfObject,
                format!("Key '{}' is not part of the object", key),
            )),
        }
    }

    errors
}
