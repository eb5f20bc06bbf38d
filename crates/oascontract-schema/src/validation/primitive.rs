//! Primitive validators
//!
//! Each check first confirms the JSON type, then reports every failed
//! constraint together.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::error::{ErrorKind, ValidationError};
use super::format::is_valid_format;
use crate::node::{IntegerFormat, IntegerSchema, NumberFormat, NumberSchema, StringSchema};
use serde_json::Value;

/// JSON type name of a runtime value
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn type_mismatch(expected: &str, value: &Value) -> ValidationError {
    ValidationError::plain(
        ErrorKind::IncorrectTypeSupplied,
        format!(
            "Incorrect type supplied: expected {}, got {}",
            expected,
            json_type(value)
        ),
    )
}

pub(crate) fn check_string(schema: &StringSchema, value: &Value) -> Vec<ValidationError> {
    match value.as_str() {
        Some(s) => check_string_constraints(schema, s, true),
        None => vec![type_mismatch("string", value)],
    }
}

/// Length, format and (optionally) enumeration checks on a string
pub(crate) fn check_string_constraints(
    schema: &StringSchema,
    value: &str,
    check_enum: bool,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let length = value.chars().count();

    if let Some(min) = schema.min_length {
        if length < min {
            errors.push(ValidationError::plain(
                ErrorKind::LessThanMinimumLength,
                format!("Length {} is less than the minimum length of {}", length, min),
            ));
        }
    }
    if let Some(max) = schema.max_length {
        if length > max {
            errors.push(ValidationError::plain(
                ErrorKind::MoreThanMaximumLength,
                format!("Length {} is more than the maximum length of {}", length, max),
            ));
        }
    }

    if let Some(format) = schema.format {
        if !is_valid_format(format, value) {
            errors.push(ValidationError::plain(
                ErrorKind::InvalidFormat,
                format!("Value '{}' is not a valid {}", value, format),
            ));
        }
    }

    if check_enum {
        if let Some(allowed) = &schema.enumeration {
            if !allowed.contains(value) {
                let listed: Vec<&str> = allowed.iter().map(String::as_str).collect();
                errors.push(ValidationError::plain(
                    ErrorKind::NotInEnum,
                    format!("Value '{}' is not one of: {}", value, listed.join(", ")),
                ));
            }
        }
    }

    errors
}

pub(crate) fn check_integer(schema: &IntegerSchema, value: &Value) -> Vec<ValidationError> {
    let number = match value.as_i64().map(i128::from).or_else(|| value.as_u64().map(i128::from)) {
        Some(number) => number,
        None => return vec![type_mismatch("integer", value)],
    };

    let mut errors = Vec::new();
    if let Some(min) = schema.minimum {
        if number < i128::from(min) {
            errors.push(below_minimum(number, min));
        }
    }
    if let Some(max) = schema.maximum {
        if number > i128::from(max) {
            errors.push(above_maximum(number, max));
        }
    }

    let in_range = match schema.format {
        Some(IntegerFormat::Int32) => i32::try_from(number).is_ok(),
        Some(IntegerFormat::Int64) => i64::try_from(number).is_ok(),
        None => true,
    };
    if !in_range {
        if let Some(format) = schema.format {
            errors.push(ValidationError::plain(
                ErrorKind::InvalidFormat,
                format!("Value {} does not fit in {}", number, format),
            ));
        }
    }

    errors
}

pub(crate) fn check_number(schema: &NumberSchema, value: &Value) -> Vec<ValidationError> {
    let number = match value.as_f64() {
        Some(number) => number,
        None => return vec![type_mismatch("number", value)],
    };

    let mut errors = Vec::new();
    if let Some(min) = schema.minimum {
        if number < min {
            errors.push(below_minimum(number, min));
        }
    }
    if let Some(max) = schema.maximum {
        if number > max {
            errors.push(above_maximum(number, max));
        }
    }
    if schema.format == Some(NumberFormat::Float) && number.abs() > f64::from(f32::MAX) {
        errors.push(ValidationError::plain(
            ErrorKind::InvalidFormat,
            format!("Value {} does not fit in float", number),
        ));
    }

    errors
}

pub(crate) fn check_boolean(value: &Value) -> Vec<ValidationError> {
    if value.is_boolean() {
        Vec::new()
    } else {
        vec![type_mismatch("boolean", value)]
    }
}

fn below_minimum<V: std::fmt::Display, B: std::fmt::Display>(value: V, min: B) -> ValidationError {
    ValidationError::plain(
        ErrorKind::LessThanMinimum,
        format!("Value {} is less than the minimum of {}", value, min),
    )
}

fn above_maximum<V: std::fmt::Display, B: std::fmt::Display>(value: V, max: B) -> ValidationError {
    ValidationError::plain(
        ErrorKind::MoreThanMaximum,
        format!("Value {} is more than the maximum of {}", value, max),
    )
}
