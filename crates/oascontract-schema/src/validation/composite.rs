//! allOf / anyOf / oneOf validators
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::check_within;
use super::container::check_object;
use super::error::{BranchErrors, ErrorKind, ValidationError};
use crate::node::{CompositeKind, CompositeSchema};
use serde_json::Value;

pub(crate) fn check_composite(schema: &CompositeSchema, value: &Value) -> Vec<ValidationError> {
    match schema.kind() {
        CompositeKind::AllOf => check_object(&schema.merged_properties(), value),
        CompositeKind::AnyOf => check_any_of(schema, value),
        CompositeKind::OneOf => check_one_of(schema, value),
    }
}

fn member_errors(schema: &CompositeSchema, value: &Value) -> BranchErrors {
    schema
        .members()
        .iter()
        .map(|(name, member)| (name.to_string(), check_within(member, value)))
        .collect()
}

fn check_any_of(schema: &CompositeSchema, value: &Value) -> Vec<ValidationError> {
    let branches = member_errors(schema, value);
    if branches.values().any(Vec::is_empty) {
        return Vec::new();
    }

    vec![ValidationError::plain(
        ErrorKind::NoMemberMatched,
        format!(
            "Value does not match any of the {} allowed schemas",
            branches.len()
        ),
    )
    .with_branches(branches)]
}

fn check_one_of(schema: &CompositeSchema, value: &Value) -> Vec<ValidationError> {
    let branches = member_errors(schema, value);
    let matched = branches.values().filter(|errors| errors.is_empty()).count();
    if matched == 1 {
        return Vec::new();
    }

    let failed: BranchErrors = branches
        .into_iter()
        .filter(|(_, errors)| !errors.is_empty())
        .collect();
    vec![ValidationError::plain(
        ErrorKind::ExactlyOneMustMatch,
        format!("Exactly ONE value should match, {} matched", matched),
    )
    .with_branches(failed)]
}
