//! Schema Object rendering
//!
//! [`to_document`] turns a node into the OpenAPI Schema Object fragment that
//! is published in a document. Optional attributes that are not set are left
//! out of the output instead of being written as `null`, and a reference
//! always renders as a bare `$ref`.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::node::{SchemaKind, SchemaNode};
use serde_json::{json, Map, Value};

/// Render `node` as a Schema Object
///
/// ```rust
/// use oascontract_schema::{to_document, SchemaNode};
/// use serde_json::json;
///
/// let tags = SchemaNode::array(SchemaNode::string()).with_description("Tags")?;
/// assert_eq!(
///     to_document(&tags),
///     json!({"type": "array", "items": {"type": "string"}, "description": "Tags"})
/// );
/// # Ok::<(), oascontract_schema::SchemaError>(())
/// ```
pub fn to_document(node: &SchemaNode) -> Value {
    if let SchemaKind::Reference(reference) = node.kind() {
        return json!({ "$ref": reference.pointer() });
    }

    let mut doc = Map::new();
    render_kind(node.kind(), &mut doc);
    render_attributes(node, &mut doc);
    Value::Object(doc)
}

fn render_kind(kind: &SchemaKind, doc: &mut Map<String, Value>) {
    match kind {
        SchemaKind::String(schema) => {
            doc.insert("type".into(), json!("string"));
            if let Some(format) = schema.format {
                doc.insert("format".into(), json!(format.as_str()));
            }
            if let Some(values) = &schema.enumeration {
                doc.insert("enum".into(), json!(values.iter().collect::<Vec<_>>()));
            }
            insert_opt(doc, "minLength", schema.min_length);
            insert_opt(doc, "maxLength", schema.max_length);
        }
        SchemaKind::Integer(schema) => {
            doc.insert("type".into(), json!("integer"));
            if let Some(format) = schema.format {
                doc.insert("format".into(), json!(format.as_str()));
            }
            insert_opt(doc, "minimum", schema.minimum);
            insert_opt(doc, "maximum", schema.maximum);
        }
        SchemaKind::Number(schema) => {
            doc.insert("type".into(), json!("number"));
            if let Some(format) = schema.format {
                doc.insert("format".into(), json!(format.as_str()));
            }
            insert_opt(doc, "minimum", schema.minimum);
            insert_opt(doc, "maximum", schema.maximum);
        }
        SchemaKind::Boolean => {
            doc.insert("type".into(), json!("boolean"));
        }
        SchemaKind::Array(schema) => {
            doc.insert("type".into(), json!("array"));
            doc.insert("items".into(), to_document(schema.items()));
            if schema.unique_items {
                doc.insert("uniqueItems".into(), json!(true));
            }
            insert_opt(doc, "minItems", schema.min_items);
            insert_opt(doc, "maxItems", schema.max_items);
        }
        SchemaKind::Map(schema) => {
            doc.insert("type".into(), json!("object"));
            doc.insert("additionalProperties".into(), to_document(schema.values()));
        }
        SchemaKind::Object(schema) => {
            doc.insert("type".into(), json!("object"));
            doc.insert("properties".into(), schema.properties().to_properties_document());
            let required = schema.required_names();
            if !required.is_empty() {
                doc.insert("required".into(), json!(required));
            }
        }
        SchemaKind::Composite(schema) => {
            let members: Vec<Value> = schema.members().iter().map(|(_, member)| to_document(member)).collect();
            doc.insert(schema.kind().keyword().into(), Value::Array(members));
        }
        // Handled by the caller.
        SchemaKind::Reference(_) => {}
    }
}

fn render_attributes(node: &SchemaNode, doc: &mut Map<String, Value>) {
    if let Some(description) = node.description() {
        doc.insert("description".into(), json!(description));
    }
    if let Some(example) = node.example() {
        doc.insert("example".into(), example.clone());
    }
    if node.is_nullable() {
        doc.insert("nullable".into(), json!(true));
    }
    if node.is_deprecated() {
        doc.insert("deprecated".into(), json!(true));
    }
}

fn insert_opt<T: Into<Value>>(doc: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        doc.insert(key.to_string(), value.into());
    }
}
