//! Components document → schema nodes
//!
//! [`DocumentResolver`] reads the `components` section of an OpenAPI document
//! (or a bare `schemas`/`parameters` map) and builds a [`Components`] value.
//! Local `$ref`s to `#/components/schemas/<name>` are bound while the tree is
//! built: the target is built first (once, then memoised) and the reference
//! node carries it. A reference chain that loops back on itself cannot be
//! bound this way and is reported as a circular reference.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::components::Components;
use crate::loader::error::{LoaderError, LoaderResult};
use crate::node::{
    ArraySchema, IntegerFormat, IntegerSchema, NumberFormat, NumberSchema, ReferenceTarget, SchemaNode,
    StringFormat, StringSchema,
};
use crate::parameter::{Parameter, ParameterLocation};
use crate::registry::ComponentRegistry;
use serde_json::{Map, Value};
use std::collections::HashMap;

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";
const PARAMETER_POINTER: &str = "#/components/parameters/";

/// Resolution state for one document
#[derive(Debug)]
pub struct DocumentResolver<'a> {
    definitions: &'a Map<String, Value>,
    resolved: HashMap<String, SchemaNode>,
    resolution_stack: Vec<String>,
}

impl<'a> DocumentResolver<'a> {
    fn new(definitions: &'a Map<String, Value>) -> Self {
        Self {
            definitions,
            resolved: HashMap::new(),
            resolution_stack: Vec::new(),
        }
    }

    /// Build every schema and parameter component of `document`
    pub fn resolve(document: &Value) -> LoaderResult<Components> {
        let section = document
            .get("components")
            .and_then(Value::as_object)
            .or_else(|| document.as_object())
            .ok_or(LoaderError::MissingComponents)?;

        let schemas = object_entry(section, "schemas", "#/components")?;
        let parameters = object_entry(section, "parameters", "#/components")?;
        if schemas.is_none() && parameters.is_none() {
            return Err(LoaderError::MissingComponents);
        }

        let empty = Map::new();
        let definitions = schemas.unwrap_or(&empty);
        let mut resolver = DocumentResolver::new(definitions);
        let mut components = Components::new();

        for name in definitions.keys() {
            let node = resolver.component(name)?;
            let pointer = schema_pointer(name);
            components = components
                .with_schema(node)
                .map_err(|e| LoaderError::invalid_schema(&pointer, e))?;
        }

        if let Some(parameters) = parameters {
            for (key, definition) in parameters {
                let pointer = format!("{}{}", PARAMETER_POINTER, escape_pointer(key));
                let parameter = resolver.parameter(definition, &pointer)?;
                components = components
                    .with_parameter(key.clone(), parameter)
                    .map_err(|e| LoaderError::invalid_schema(&pointer, e))?;
            }
        }

        tracing::debug!(
            schemas = components.schemas().len(),
            parameters = components.parameters().count(),
            "Resolved components"
        );
        Ok(components)
    }

    /// Named schema component, built on first use
    fn component(&mut self, name: &str) -> LoaderResult<SchemaNode> {
        if let Some(node) = self.resolved.get(name) {
            return Ok(node.clone());
        }

        if self.resolution_stack.iter().any(|entry| entry == name) {
            let mut chain = self.resolution_stack.clone();
            chain.push(name.to_string());
            return Err(LoaderError::circular_reference(&chain));
        }

        let definitions = self.definitions;
        let definition = definitions.get(name).ok_or_else(|| LoaderError::UnknownReference {
            reference: schema_pointer(name),
            pointer: self.current_pointer(),
        })?;

        self.resolution_stack.push(name.to_string());
        let built = self.schema(definition, &schema_pointer(name));
        self.resolution_stack.pop();

        let node = built?.named(name);
        tracing::trace!(component = name, "Built schema component");
        self.resolved.insert(name.to_string(), node.clone());
        Ok(node)
    }

    fn current_pointer(&self) -> String {
        self.resolution_stack
            .last()
            .map(|name| schema_pointer(name))
            .unwrap_or_else(|| "#".to_string())
    }

    fn schema(&mut self, definition: &Value, pointer: &str) -> LoaderResult<SchemaNode> {
        let object = definition
            .as_object()
            .ok_or_else(|| LoaderError::malformed(pointer, "schema must be an object"))?;

        if let Some(reference) = object.get("$ref") {
            // Sibling keywords of a $ref are ignored.
            return self.reference(reference, pointer);
        }

        let node = self.schema_kind(object, pointer)?;
        self.attributes(node, object, pointer)
    }

    fn reference(&mut self, reference: &Value, pointer: &str) -> LoaderResult<SchemaNode> {
        let reference = reference
            .as_str()
            .ok_or_else(|| LoaderError::malformed(pointer, "$ref must be a string"))?;
        let name = reference
            .strip_prefix(SCHEMA_REF_PREFIX)
            .map(unescape_pointer)
            .ok_or_else(|| LoaderError::UnknownReference {
                reference: reference.to_string(),
                pointer: pointer.to_string(),
            })?;

        if !self.definitions.contains_key(&name) {
            return Err(LoaderError::UnknownReference {
                reference: reference.to_string(),
                pointer: pointer.to_string(),
            });
        }

        let target = self.component(&name)?;
        Ok(SchemaNode::reference(ReferenceTarget::Schema, name, target))
    }

    fn schema_kind(&mut self, object: &Map<String, Value>, pointer: &str) -> LoaderResult<SchemaNode> {
        for keyword in ["allOf", "anyOf", "oneOf"] {
            if let Some(members) = object.get(keyword) {
                return self.composite(keyword, members, &format!("{}/{}", pointer, keyword));
            }
        }

        let type_name = match object.get("type") {
            Some(Value::String(type_name)) => type_name.as_str(),
            Some(_) => return Err(LoaderError::malformed(pointer, "type must be a string")),
            None if object.contains_key("properties") || object.contains_key("additionalProperties") => "object",
            None if object.contains_key("items") => "array",
            None => return Err(LoaderError::malformed(pointer, "schema has no type")),
        };

        let invalid = |e| LoaderError::invalid_schema(pointer, e);
        match type_name {
            "string" => SchemaNode::new(string_schema(object, pointer)?).map_err(invalid),
            "integer" => SchemaNode::new(integer_schema(object, pointer)?).map_err(invalid),
            "number" => SchemaNode::new(number_schema(object, pointer)?).map_err(invalid),
            "boolean" => Ok(SchemaNode::boolean()),
            "array" => {
                let items = object
                    .get("items")
                    .ok_or_else(|| LoaderError::malformed(pointer, "array schema has no items"))?;
                let items = self.schema(items, &format!("{}/items", pointer))?;
                let mut array = ArraySchema::new(items);
                if object.get("uniqueItems").and_then(Value::as_bool).unwrap_or(false) {
                    array = array.unique_items();
                }
                if let Some(min) = usize_keyword(object, "minItems", pointer)? {
                    array = array.min_items(min);
                }
                if let Some(max) = usize_keyword(object, "maxItems", pointer)? {
                    array = array.max_items(max);
                }
                SchemaNode::new(array).map_err(invalid)
            }
            "object" => self.object(object, pointer),
            other => Err(LoaderError::malformed(pointer, format!("unsupported type '{}'", other))),
        }
    }

    fn object(&mut self, object: &Map<String, Value>, pointer: &str) -> LoaderResult<SchemaNode> {
        let properties = object_entry(object, "properties", pointer)?.filter(|p| !p.is_empty());

        let Some(properties) = properties else {
            return match object.get("additionalProperties") {
                Some(values @ Value::Object(_)) => {
                    let values = self.schema(values, &format!("{}/additionalProperties", pointer))?;
                    Ok(SchemaNode::map(values))
                }
                _ => Err(LoaderError::malformed(
                    pointer,
                    "object schema needs properties or an additionalProperties schema",
                )),
            };
        };

        let required: Vec<&str> = match object.get("required") {
            None => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .map(|name| {
                    name.as_str()
                        .ok_or_else(|| LoaderError::malformed(pointer, "required entries must be strings"))
                })
                .collect::<LoaderResult<_>>()?,
            Some(_) => return Err(LoaderError::malformed(pointer, "required must be an array")),
        };

        let mut registry = ComponentRegistry::new();
        for (key, definition) in properties {
            let property_pointer = format!("{}/properties/{}", pointer, escape_pointer(key));
            let mut property = self.schema(definition, &property_pointer)?.named(key);
            if required.contains(&key.as_str()) {
                property = property.required();
            }
            registry = registry
                .with(property)
                .map_err(|e| LoaderError::invalid_schema(&property_pointer, e))?;
        }

        SchemaNode::object(registry).map_err(|e| LoaderError::invalid_schema(pointer, e))
    }

    fn composite(&mut self, keyword: &str, members: &Value, pointer: &str) -> LoaderResult<SchemaNode> {
        let members = members
            .as_array()
            .ok_or_else(|| LoaderError::malformed(pointer, format!("{} must be an array", keyword)))?;

        let mut nodes = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            nodes.push(self.schema(member, &format!("{}/{}", pointer, index))?);
        }

        let built = match keyword {
            "allOf" => SchemaNode::all_of(nodes),
            "anyOf" => SchemaNode::any_of(nodes),
            _ => SchemaNode::one_of(nodes),
        };
        built.map_err(|e| LoaderError::invalid_schema(pointer, e))
    }

    fn attributes(&self, mut node: SchemaNode, object: &Map<String, Value>, pointer: &str) -> LoaderResult<SchemaNode> {
        let invalid = |e| LoaderError::invalid_schema(pointer, e);

        if let Some(description) = object.get("description").and_then(Value::as_str) {
            node = node.with_description(description).map_err(invalid)?;
        }
        if object.get("nullable").and_then(Value::as_bool).unwrap_or(false) {
            node = node.nullable().map_err(invalid)?;
        }
        if object.get("deprecated").and_then(Value::as_bool).unwrap_or(false) {
            node = node.deprecated().map_err(invalid)?;
        }
        if let Some(example) = object.get("example") {
            node = node.with_example(example.clone()).map_err(invalid)?;
        }
        Ok(node)
    }

    fn parameter(&mut self, definition: &Value, pointer: &str) -> LoaderResult<Parameter> {
        let object = definition
            .as_object()
            .ok_or_else(|| LoaderError::malformed(pointer, "parameter must be an object"))?;

        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| LoaderError::malformed(pointer, "parameter has no name"))?;
        let location = object
            .get("in")
            .and_then(Value::as_str)
            .and_then(ParameterLocation::from_tag)
            .ok_or_else(|| LoaderError::malformed(pointer, "parameter 'in' must be path, query, header or cookie"))?;
        let schema = object
            .get("schema")
            .ok_or_else(|| LoaderError::malformed(pointer, "parameter has no schema"))?;
        let schema = self.schema(schema, &format!("{}/schema", pointer))?;

        let mut parameter = Parameter::new(name, location, schema);
        match object.get("required").and_then(Value::as_bool) {
            Some(true) => parameter = parameter.required(),
            Some(false) => {
                parameter = parameter
                    .optional()
                    .map_err(|e| LoaderError::invalid_schema(pointer, e))?
            }
            None => {}
        }
        if let Some(description) = object.get("description").and_then(Value::as_str) {
            parameter = parameter.with_description(description);
        }
        if object.get("deprecated").and_then(Value::as_bool).unwrap_or(false) {
            parameter = parameter.deprecated();
        }
        Ok(parameter)
    }
}

fn string_schema(object: &Map<String, Value>, pointer: &str) -> LoaderResult<StringSchema> {
    let mut schema = StringSchema::new();
    if let Some(format) = object.get("format").and_then(Value::as_str) {
        match StringFormat::from_tag(format) {
            Some(format) => schema = schema.format(format),
            None => tracing::debug!(pointer, format, "Ignoring unknown string format"),
        }
    }
    if let Some(values) = object.get("enum") {
        let values = values
            .as_array()
            .ok_or_else(|| LoaderError::malformed(pointer, "enum must be an array"))?;
        let values = values
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| LoaderError::malformed(pointer, "string enum values must be strings"))
            })
            .collect::<LoaderResult<Vec<_>>>()?;
        schema = schema.enumeration(values);
    }
    if let Some(min) = usize_keyword(object, "minLength", pointer)? {
        schema = schema.min_length(min);
    }
    if let Some(max) = usize_keyword(object, "maxLength", pointer)? {
        schema = schema.max_length(max);
    }
    Ok(schema)
}

fn integer_schema(object: &Map<String, Value>, pointer: &str) -> LoaderResult<IntegerSchema> {
    let mut schema = IntegerSchema::new();
    if let Some(format) = object.get("format").and_then(Value::as_str) {
        match IntegerFormat::from_tag(format) {
            Some(format) => schema = schema.format(format),
            None => tracing::debug!(pointer, format, "Ignoring unknown integer format"),
        }
    }
    for keyword in ["minimum", "maximum"] {
        if let Some(bound) = object.get(keyword) {
            let bound = bound
                .as_i64()
                .ok_or_else(|| LoaderError::malformed(pointer, format!("{} must be an integer", keyword)))?;
            schema = if keyword == "minimum" {
                schema.minimum(bound)
            } else {
                schema.maximum(bound)
            };
        }
    }
    Ok(schema)
}

fn number_schema(object: &Map<String, Value>, pointer: &str) -> LoaderResult<NumberSchema> {
    let mut schema = NumberSchema::new();
    if let Some(format) = object.get("format").and_then(Value::as_str) {
        match NumberFormat::from_tag(format) {
            Some(format) => schema = schema.format(format),
            None => tracing::debug!(pointer, format, "Ignoring unknown number format"),
        }
    }
    for keyword in ["minimum", "maximum"] {
        if let Some(bound) = object.get(keyword) {
            let bound = bound
                .as_f64()
                .ok_or_else(|| LoaderError::malformed(pointer, format!("{} must be a number", keyword)))?;
            schema = if keyword == "minimum" {
                schema.minimum(bound)
            } else {
                schema.maximum(bound)
            };
        }
    }
    Ok(schema)
}

fn usize_keyword(object: &Map<String, Value>, keyword: &str, pointer: &str) -> LoaderResult<Option<usize>> {
    match object.get(keyword) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| LoaderError::malformed(pointer, format!("{} must be a non-negative integer", keyword))),
    }
}

fn object_entry<'v>(
    object: &'v Map<String, Value>,
    key: &str,
    pointer: &str,
) -> LoaderResult<Option<&'v Map<String, Value>>> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::Object(entries)) => Ok(Some(entries)),
        Some(_) => Err(LoaderError::malformed(pointer, format!("{} must be an object", key))),
    }
}

fn schema_pointer(name: &str) -> String {
    format!("{}{}", SCHEMA_REF_PREFIX, escape_pointer(name))
}

/// RFC 6901 escaping of one pointer token
fn escape_pointer(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn unescape_pointer(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SchemaKind;
    use serde_json::json;

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(escape_pointer("a/b~c"), "a~1b~0c");
        assert_eq!(unescape_pointer("a~1b~0c"), "a/b~c");
    }

    #[test]
    fn test_bare_schemas_map() {
        let components = DocumentResolver::resolve(&json!({
            "schemas": {"Flag": {"type": "boolean"}}
        }))
        .unwrap();
        assert!(matches!(components.schema("Flag").unwrap().kind(), SchemaKind::Boolean));
    }

    #[test]
    fn test_missing_components() {
        assert!(matches!(
            DocumentResolver::resolve(&json!({"openapi": "3.0.3"})),
            Err(LoaderError::MissingComponents)
        ));
        assert!(matches!(
            DocumentResolver::resolve(&json!("text")),
            Err(LoaderError::MissingComponents)
        ));
    }

    #[test]
    fn test_self_reference_is_circular() {
        let err = DocumentResolver::resolve(&json!({
            "components": {"schemas": {
                "Node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/components/schemas/Node"}}
                }
            }}
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Circular reference detected: Node -> Node");
    }

    #[test]
    fn test_inferred_types() {
        let components = DocumentResolver::resolve(&json!({
            "schemas": {
                "Labels": {"additionalProperties": {"type": "string"}},
                "Ids": {"items": {"type": "integer"}}
            }
        }))
        .unwrap();
        assert_eq!(components.schema("Labels").unwrap().type_name(), "map");
        assert_eq!(components.schema("Ids").unwrap().type_name(), "array");
    }
}
