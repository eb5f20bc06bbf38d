//! Operation parameters
//!
//! A [`Parameter`] ties a schema to a transport location. Its raw text goes
//! through the casting engine and then the validation engine, and the
//! resulting errors are located by the parameter name.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::cast::cast_from_string;
use crate::document::to_document;
use crate::error::{SchemaError, SchemaResult};
use crate::node::SchemaNode;
use crate::validation::{check_within, ErrorKind, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, located, schema-typed request parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    location: ParameterLocation,
    schema: SchemaNode,
    required: bool,
    description: Option<String>,
    deprecated: bool,
}

impl Parameter {
    /// Path parameters start out required; others follow the schema's flag
    pub fn new(name: impl Into<String>, location: ParameterLocation, schema: SchemaNode) -> Self {
        let required = location == ParameterLocation::Path || schema.is_required();
        Self {
            name: name.into(),
            location,
            schema,
            required,
            description: None,
            deprecated: false,
        }
    }

    pub fn path(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Path, schema)
    }

    pub fn query(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Query, schema)
    }

    pub fn header(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Header, schema)
    }

    pub fn cookie(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self::new(name, ParameterLocation::Cookie, schema)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn required(&self) -> Self {
        let mut next = self.clone();
        next.required = true;
        next
    }

    pub fn optional(&self) -> SchemaResult<Self> {
        if self.location == ParameterLocation::Path {
            return Err(SchemaError::OptionalPathParameter {
                name: self.name.clone(),
            });
        }
        let mut next = self.clone();
        next.required = false;
        Ok(next)
    }

    pub fn with_description(&self, description: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.description = Some(description.into());
        next
    }

    pub fn deprecated(&self) -> Self {
        let mut next = self.clone();
        next.deprecated = true;
        next
    }

    /// Cast and validate the raw transport value
    ///
    /// `None` means the parameter was not sent at all.
    pub fn extract(&self, raw: Option<&str>) -> Result<Value, Vec<ValidationError>> {
        let raw = match raw {
            Some(raw) => raw,
            None if self.required => {
                return Err(vec![ValidationError::field(
                    [self.name.as_str()],
                    ErrorKind::IsRequiredField,
                    format!("Required {} parameter '{}' is missing", self.location, self.name),
                )]);
            }
            None => return Ok(Value::Null),
        };

        let value = cast_from_string(&self.schema, raw);
        let errors = check_within(&self.schema, &value);
        if errors.is_empty() {
            return Ok(value);
        }

        tracing::debug!(
            parameter = %self.name,
            location = %self.location,
            count = errors.len(),
            "Parameter failed validation"
        );
        Err(errors.into_iter().map(|e| e.scoped(self.name.as_str())).collect())
    }

    /// Render as an OpenAPI Parameter Object
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("name".into(), json!(self.name));
        doc.insert("in".into(), json!(self.location.as_str()));
        if self.required {
            doc.insert("required".into(), json!(true));
        }
        if let Some(description) = &self.description {
            doc.insert("description".into(), json!(description));
        }
        if self.deprecated {
            doc.insert("deprecated".into(), json!(true));
        }
        doc.insert("schema".into(), to_document(&self.schema));
        Value::Object(doc)
    }
}
