//! Construction-time error types
//!
//! These errors describe a broken contract definition (an object without
//! properties, `minimum > maximum`, a duplicate component name, ...). They are
//! raised while a schema tree is assembled and never while a value is checked;
//! data errors are reported as [`ValidationError`](crate::ValidationError)
//! lists instead.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A schema tree that cannot be built as requested
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// Object schemas must declare at least one property
    #[error("Object schema must declare at least one property")]
    EmptyObject,

    /// allOf/anyOf/oneOf without members
    #[error("{kind} schema must declare at least one member")]
    EmptyComposite { kind: &'static str },

    /// A lower bound greater than its upper bound
    #[error("Invalid {constraint} bounds: minimum {min} is greater than maximum {max}")]
    InvalidBounds {
        constraint: &'static str,
        min: String,
        max: String,
    },

    /// Non-finite numeric bound
    #[error("Invalid {constraint}: {value} is not a finite number")]
    NonFiniteBound { constraint: &'static str, value: f64 },

    /// An enumeration with no values
    #[error("Enumeration must contain at least one value")]
    EmptyEnum,

    /// An enumeration value that its own schema rejects
    #[error("Enumeration value '{value}' is invalid: {reason}")]
    InvalidEnumValue { value: String, reason: String },

    /// An allOf member that is neither an object nor another allOf
    #[error("allOf member '{member}' is a {kind} schema; allOf only merges object schemas")]
    UnsupportedAllOfMember { member: String, kind: &'static str },

    /// Registry insert with a name that is already taken
    #[error("Component '{name}' is already registered")]
    DuplicateComponent { name: String },

    /// Registry insert of a node without a name
    #[error("Component must be named before it can be registered")]
    UnnamedComponent,

    /// Reference lookup in a section that has no such entry
    #[error("Component '{name}' not found in section '{section}'")]
    UnknownComponent { section: &'static str, name: String },

    /// Attribute set on a reference node
    #[error("Cannot set '{attribute}' on a reference to '{target}'; references ignore sibling attributes")]
    ReferenceSibling {
        attribute: &'static str,
        target: String,
    },

    /// Example value that fails its own schema
    #[error("Example does not satisfy its own schema: {errors}")]
    InvalidExample { errors: ValidationErrors },

    /// Path parameters are always required
    #[error("Path parameter '{name}' cannot be optional")]
    OptionalPathParameter { name: String },
}

impl SchemaError {
    /// Create a bounds error from any displayable pair
    pub fn invalid_bounds<T: ToString>(constraint: &'static str, min: T, max: T) -> Self {
        Self::InvalidBounds {
            constraint,
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create an unknown component error
    pub fn unknown_component(section: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownComponent {
            section,
            name: name.into(),
        }
    }
}
