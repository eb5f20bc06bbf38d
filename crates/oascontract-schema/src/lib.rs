//! OAS Contract Schema - typed OpenAPI schema model, validation and casting
//!
//! This crate models the schema part of an HTTP API contract as an immutable
//! tree of [`SchemaNode`]s and provides the engines that work on that tree:
//!
//! - **Validation**: [`validate`] checks a runtime JSON value and returns
//!   every problem as a path-located [`ValidationError`]
//! - **Casting**: [`cast_from_string`] turns transport text (query, path,
//!   header and cookie values) into the JSON value a schema expects
//! - **Serialization**: [`to_document`] renders the OpenAPI 3.0 Schema Object
//! - **References**: `$ref` nodes bound to their target at construction time
//! - **Loading**: [`loader`] reads the components of a YAML/JSON document
//!
//! ## Quick Start
//!
//! ```rust
//! use oascontract_schema::{validate, ErrorKind, IntegerSchema, SchemaNode};
//! use serde_json::json;
//!
//! let pet = SchemaNode::object_from([
//!     SchemaNode::string().named("name").required(),
//!     SchemaNode::new(IntegerSchema::new().minimum(0))?.named("age"),
//! ])?;
//!
//! assert!(validate(&pet, &json!({"name": "Rex", "age": 3})).is_empty());
//!
//! let errors = validate(&pet, &json!({"age": -1}));
//! assert_eq!(errors[0].kind(), ErrorKind::IsRequiredField);
//! assert_eq!(errors[1].kind(), ErrorKind::LessThanMinimum);
//! # Ok::<(), oascontract_schema::SchemaError>(())
//! ```
//!
//! ## Error Channels
//!
//! - Building a broken tree (an empty object, `minimum > maximum`, a duplicate
//!   component, attributes on a reference) fails with [`SchemaError`]
//! - Bad data is never an `Err`: validation returns a list of errors, empty
//!   when the value is valid
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod cast;
pub mod components;
pub mod document;
pub mod error;
pub mod loader;
pub mod node;
pub mod parameter;
pub mod registry;
pub mod validation;

// Re-export commonly used types for convenience
pub use cast::{cast_from_string, cast_value};
pub use components::Components;
pub use document::to_document;
pub use error::{SchemaError, SchemaResult};
pub use node::{
    ArraySchema, Attributes, CompositeKind, CompositeSchema, IntegerFormat, IntegerSchema, MapSchema,
    NumberFormat, NumberSchema, ObjectSchema, ReferenceSchema, ReferenceTarget, SchemaKind, SchemaNode,
    StringFormat, StringSchema,
};
pub use parameter::{Parameter, ParameterLocation};
pub use registry::ComponentRegistry;
pub use validation::{
    format_path, validate, validate_batch, ErrorKind, PathSegment, ValidationConfig, ValidationError,
    ValidationErrors,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
