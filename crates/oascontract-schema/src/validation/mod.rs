//! Validation engine
//!
//! [`validate`] checks a runtime value against a [`SchemaNode`] and returns
//! every problem it finds. An empty list means the value is valid. Validation
//! never fails as an operation: bad data is reported as [`ValidationError`]
//! values, not as `Err`.
//!
//! Checking dispatches on the node's variant:
//!
//! - a nullable node accepts `null` before any other check runs
//! - primitives check the JSON type, then every applicable constraint
//! - arrays locate element errors by index, objects by property key
//! - anyOf/oneOf report per-member errors as branches
//! - references delegate to their bound target
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod composite;
mod container;
pub mod error;
pub mod format;
pub mod primitive;

pub use error::{format_path, BranchErrors, ErrorKind, PathSegment, ValidationError, ValidationErrors};
pub use format::is_valid_format;

use crate::node::{CompositeKind, SchemaKind, SchemaNode};
use serde_json::Value;

/// Validate `value` against `node`
///
/// A named object, map or allOf prefixes its errors with its own name, so a
/// standalone component reports where its bad entries came from.
///
/// # Examples
///
/// ```rust
/// use oascontract_schema::{validate, ErrorKind, SchemaNode};
/// use serde_json::json;
///
/// let placeholders = SchemaNode::map(SchemaNode::string()).named("placeholders");
/// let errors = validate(&placeholders, &json!({"%x%": 5}));
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].kind(), ErrorKind::IncorrectTypeSupplied);
/// assert_eq!(errors[0].path(), &["placeholders".into()]);
/// ```
pub fn validate(node: &SchemaNode, value: &Value) -> Vec<ValidationError> {
    tracing::trace!(schema = node.type_name(), "Validating value");

    let errors = check(node, value);
    if !errors.is_empty() {
        tracing::debug!(schema = node.type_name(), count = errors.len(), "Value failed validation");
    }
    errors
}

/// Recursive check, scoped by the node's own name where it has one
pub(crate) fn check(node: &SchemaNode, value: &Value) -> Vec<ValidationError> {
    let errors = check_within(node, value);
    match node.name() {
        Some(name) if !errors.is_empty() && scopes_by_name(node.dereferenced().kind()) => {
            errors.into_iter().map(|e| e.scoped(name)).collect()
        }
        _ => errors,
    }
}

/// Recursive check for a node whose position already carries its name: an
/// object property, a composite branch or a parameter
pub(crate) fn check_within(node: &SchemaNode, value: &Value) -> Vec<ValidationError> {
    if node.is_nullable() && value.is_null() {
        return Vec::new();
    }

    match node.kind() {
        SchemaKind::String(schema) => primitive::check_string(schema, value),
        SchemaKind::Integer(schema) => primitive::check_integer(schema, value),
        SchemaKind::Number(schema) => primitive::check_number(schema, value),
        SchemaKind::Boolean => primitive::check_boolean(value),
        SchemaKind::Array(schema) => container::check_array(schema, value),
        SchemaKind::Map(schema) => container::check_map(schema, value),
        SchemaKind::Object(schema) => container::check_object(schema.properties(), value),
        SchemaKind::Composite(schema) => composite::check_composite(schema, value),
        SchemaKind::Reference(reference) => check_within(reference.resolved(), value),
    }
}

fn scopes_by_name(kind: &SchemaKind) -> bool {
    match kind {
        SchemaKind::Map(_) | SchemaKind::Object(_) => true,
        SchemaKind::Composite(composite) => composite.kind() == CompositeKind::AllOf,
        _ => false,
    }
}

/// Validation configuration for batch operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Whether to stop at the first invalid value
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ValidationConfig {
    /// Collect every error from every value
    pub fn strict() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
        }
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Validate several values against one node
///
/// Errors are scoped by the index of the value they belong to.
pub fn validate_batch(
    node: &SchemaNode,
    values: &[Value],
    config: &ValidationConfig,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for (i, value) in values.iter().enumerate() {
        let found = validate(node, value);
        if found.is_empty() {
            continue;
        }

        errors.extend(found.into_iter().map(|e| e.scoped(i)));

        if config.fail_fast {
            break;
        }

        if config.max_errors > 0 && errors.len() >= config.max_errors {
            errors.errors.truncate(config.max_errors);
            break;
        }
    }

    tracing::debug!(values = values.len(), errors = errors.len(), "Batch validation finished");
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::IntegerSchema;
    use serde_json::json;

    fn age() -> SchemaNode {
        SchemaNode::new(IntegerSchema::new().minimum(18)).unwrap()
    }

    #[test]
    fn test_validation_config_defaults() {
        let config = ValidationConfig::default();
        assert!(!config.fail_fast);
        assert_eq!(config.max_errors, 0);
    }

    #[test]
    fn test_validation_config_builders() {
        let config = ValidationConfig::strict().with_fail_fast().with_max_errors(5);
        assert!(config.fail_fast);
        assert_eq!(config.max_errors, 5);
    }

    #[test]
    fn test_nullable_short_circuit() {
        assert_eq!(validate(&age(), &Value::Null).len(), 1);
        assert!(validate(&age().nullable().unwrap(), &Value::Null).is_empty());
    }

    #[test]
    fn test_batch_scopes_by_index() {
        let values = vec![json!(20), json!(3), json!("x")];

        let errors = validate_batch(&age(), &values, &ValidationConfig::strict()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].path(), &[PathSegment::Index(1)]);
        assert_eq!(errors.errors[1].path(), &[PathSegment::Index(2)]);

        let errors = validate_batch(&age(), &values, &ValidationConfig::strict().with_fail_fast()).unwrap_err();
        assert_eq!(errors.len(), 1);

        let errors = validate_batch(&age(), &values, &ValidationConfig::strict().with_max_errors(1)).unwrap_err();
        assert_eq!(errors.len(), 1);

        assert!(validate_batch(&age(), &[json!(30)], &ValidationConfig::default()).is_ok());
    }

    #[test]
    fn test_reference_delegates() {
        let reference = SchemaNode::reference(crate::node::ReferenceTarget::Schema, "Age", age());
        assert_eq!(validate(&reference, &json!(10))[0].kind(), ErrorKind::LessThanMinimum);
    }
}
