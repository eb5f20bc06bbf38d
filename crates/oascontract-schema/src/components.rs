//! Reusable components
//!
//! [`Components`] holds the named schemas and parameters of a document and
//! builds references to them. A reference is bound to its target when it is
//! created, so asking for a name that is not registered fails right there.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::node::{ReferenceTarget, SchemaNode};
use crate::parameter::Parameter;
use crate::registry::ComponentRegistry;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The `components` section of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    schemas: ComponentRegistry,
    parameters: IndexMap<String, Parameter>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with a named schema added
    pub fn with_schema(&self, schema: SchemaNode) -> SchemaResult<Self> {
        let mut next = self.clone();
        next.schemas.insert(schema)?;
        Ok(next)
    }

    /// Copy with a parameter added under `key`
    ///
    /// The key is the component name used in `#/components/parameters/<key>`
    /// and may differ from the parameter's own name.
    pub fn with_parameter(&self, key: impl Into<String>, parameter: Parameter) -> SchemaResult<Self> {
        let key = key.into();
        if self.parameters.contains_key(&key) {
            return Err(SchemaError::DuplicateComponent { name: key });
        }
        let mut next = self.clone();
        next.parameters.insert(key, parameter);
        Ok(next)
    }

    pub fn schemas(&self) -> &ComponentRegistry {
        &self.schemas
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaNode> {
        self.schemas.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    /// Parameters with their component keys, in insertion order
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.parameters.iter().map(|(key, parameter)| (key.as_str(), parameter))
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.parameters.is_empty()
    }

    /// `$ref` node for a registered schema
    pub fn reference_schema(&self, name: &str) -> SchemaResult<SchemaNode> {
        let target = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::unknown_component(ReferenceTarget::Schema.section(), name))?;
        Ok(SchemaNode::reference(ReferenceTarget::Schema, name, target.clone()))
    }

    /// `$ref` node for a registered parameter, bound to its schema
    pub fn reference_parameter(&self, name: &str) -> SchemaResult<SchemaNode> {
        let parameter = self
            .parameters
            .get(name)
            .ok_or_else(|| SchemaError::unknown_component(ReferenceTarget::Parameter.section(), name))?;
        Ok(SchemaNode::reference(
            ReferenceTarget::Parameter,
            name,
            parameter.schema().clone(),
        ))
    }

    /// Render the section; entries sorted by name, empty sections left out
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        if !self.schemas.is_empty() {
            doc.insert("schemas".into(), self.schemas.to_components_document());
        }
        if !self.parameters.is_empty() {
            let mut names: Vec<&String> = self.parameters.keys().collect();
            names.sort_unstable();
            let rendered: Map<String, Value> = names
                .into_iter()
                .filter_map(|name| {
                    self.parameters
                        .get(name)
                        .map(|parameter| (name.clone(), parameter.to_document()))
                })
                .collect();
            doc.insert("parameters".into(), Value::Object(rendered));
        }
        Value::Object(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use serde_json::json;

    fn components() -> Components {
        Components::new()
            .with_schema(SchemaNode::string().named("Name"))
            .and_then(|c| c.with_schema(SchemaNode::integer().named("Age")))
            .and_then(|c| c.with_parameter("PetId", Parameter::path("petId", SchemaNode::integer())))
            .unwrap()
    }

    #[test]
    fn test_reference_is_bound_eagerly() {
        let components = components();
        let age = components.reference_schema("Age").unwrap();
        assert!(validate(&age, &json!(3)).is_empty());
        assert_eq!(validate(&age, &json!("3")).len(), 1);

        assert!(matches!(
            components.reference_schema("Owner"),
            Err(SchemaError::UnknownComponent { section: "schemas", .. })
        ));
    }

    #[test]
    fn test_parameter_reference() {
        let reference = components().reference_parameter("PetId").unwrap();
        assert_eq!(
            crate::document::to_document(&reference),
            json!({"$ref": "#/components/parameters/PetId"})
        );
    }

    #[test]
    fn test_duplicate_schema_rejected() {
        assert!(matches!(
            components().with_schema(SchemaNode::boolean().named("Age")),
            Err(SchemaError::DuplicateComponent { .. })
        ));
    }

    #[test]
    fn test_document_sorted() {
        let doc = components().to_document();
        let names: Vec<&String> = doc["schemas"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["Age", "Name"]);
        assert_eq!(doc["parameters"]["PetId"]["in"], "path");
        assert_eq!(Components::new().to_document(), json!({}));
    }
}
