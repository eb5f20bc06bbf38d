//! Schema node model
//!
//! A [`SchemaNode`] is one typed unit of an API contract: a primitive, a
//! container, a composite or a reference, plus the attributes every variant
//! shares. Nodes are immutable values. Every combinator returns a new node and
//! leaves its receiver untouched; children sit behind `Arc`, so a change only
//! copies the level that was edited.
//!
//! ```rust
//! use oascontract_schema::{SchemaNode, StringSchema, validate};
//! use serde_json::json;
//!
//! let code = SchemaNode::new(StringSchema::new().min_length(2).max_length(5))?
//!     .named("code")
//!     .required();
//! let body = SchemaNode::object_from([code])?;
//!
//! assert!(validate(&body, &json!({"code": "ab"})).is_empty());
//! assert_eq!(validate(&body, &json!({})).len(), 1);
//! # Ok::<(), oascontract_schema::SchemaError>(())
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod composite;
pub mod container;
pub mod primitive;
pub mod reference;

pub use composite::{CompositeKind, CompositeSchema};
pub use container::{ArraySchema, MapSchema, ObjectSchema};
pub use primitive::{IntegerFormat, IntegerSchema, NumberFormat, NumberSchema, StringFormat, StringSchema};
pub use reference::{ReferenceSchema, ReferenceTarget};

use crate::error::{SchemaError, SchemaResult};
use crate::registry::ComponentRegistry;
use crate::validation::{validate, ValidationErrors};
use serde_json::Value;

/// Attributes shared by every variant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub(crate) nullable: bool,
    pub(crate) required: bool,
    pub(crate) deprecated: bool,
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) example: Option<Value>,
}

/// Variant tag and payload
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String(StringSchema),
    Integer(IntegerSchema),
    Number(NumberSchema),
    Boolean,
    Array(ArraySchema),
    Map(MapSchema),
    Object(ObjectSchema),
    Composite(CompositeSchema),
    Reference(ReferenceSchema),
}

impl SchemaKind {
    /// Short name of the variant, used in messages and placeholder names
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaKind::String(_) => "string",
            SchemaKind::Integer(_) => "integer",
            SchemaKind::Number(_) => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Array(_) => "array",
            SchemaKind::Map(_) => "map",
            SchemaKind::Object(_) => "object",
            SchemaKind::Composite(composite) => composite.kind.keyword(),
            SchemaKind::Reference(_) => "reference",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            SchemaKind::String(_) | SchemaKind::Integer(_) | SchemaKind::Number(_) | SchemaKind::Boolean
        )
    }

    fn check(&self) -> SchemaResult<()> {
        match self {
            SchemaKind::String(schema) => schema.check(),
            SchemaKind::Integer(schema) => schema.check(),
            SchemaKind::Number(schema) => schema.check(),
            SchemaKind::Array(schema) => schema.check(),
            SchemaKind::Object(schema) => schema.check(),
            SchemaKind::Composite(schema) => schema.check(),
            SchemaKind::Boolean | SchemaKind::Map(_) | SchemaKind::Reference(_) => Ok(()),
        }
    }
}

macro_rules! impl_from_payload {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for SchemaKind {
                fn from(payload: $payload) -> Self {
                    SchemaKind::$variant(payload)
                }
            }
        )*
    };
}

impl_from_payload!(
    StringSchema => String,
    IntegerSchema => Integer,
    NumberSchema => Number,
    ArraySchema => Array,
    MapSchema => Map,
    ObjectSchema => Object,
    CompositeSchema => Composite,
    ReferenceSchema => Reference,
);

/// One schema in the contract tree
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    kind: SchemaKind,
    attrs: Attributes,
}

impl SchemaNode {
    /// Build a node from a payload, running every construction-time check
    pub fn new(kind: impl Into<SchemaKind>) -> SchemaResult<Self> {
        let kind = kind.into();
        kind.check()?;
        Ok(Self::unchecked(kind))
    }

    fn unchecked(kind: SchemaKind) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
        }
    }

    pub fn string() -> Self {
        Self::unchecked(SchemaKind::String(StringSchema::new()))
    }

    pub fn integer() -> Self {
        Self::unchecked(SchemaKind::Integer(IntegerSchema::new()))
    }

    pub fn number() -> Self {
        Self::unchecked(SchemaKind::Number(NumberSchema::new()))
    }

    pub fn boolean() -> Self {
        Self::unchecked(SchemaKind::Boolean)
    }

    /// Unbounded array of `items`
    pub fn array(items: SchemaNode) -> Self {
        Self::unchecked(SchemaKind::Array(ArraySchema::new(items)))
    }

    /// Object with arbitrary keys whose values follow `values`
    pub fn map(values: SchemaNode) -> Self {
        Self::unchecked(SchemaKind::Map(MapSchema::new(values)))
    }

    pub fn object(properties: ComponentRegistry) -> SchemaResult<Self> {
        Self::new(ObjectSchema::new(properties))
    }

    /// Object from named property nodes, in declaration order
    pub fn object_from<I>(properties: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = SchemaNode>,
    {
        Self::object(ComponentRegistry::from_nodes(properties)?)
    }

    pub fn all_of<I: IntoIterator<Item = SchemaNode>>(members: I) -> SchemaResult<Self> {
        Self::new(CompositeSchema::new(CompositeKind::AllOf, members)?)
    }

    pub fn any_of<I: IntoIterator<Item = SchemaNode>>(members: I) -> SchemaResult<Self> {
        Self::new(CompositeSchema::new(CompositeKind::AnyOf, members)?)
    }

    pub fn one_of<I: IntoIterator<Item = SchemaNode>>(members: I) -> SchemaResult<Self> {
        Self::new(CompositeSchema::new(CompositeKind::OneOf, members)?)
    }

    /// Reference bound to an already-built target
    pub fn reference(target: ReferenceTarget, target_name: impl Into<String>, resolved: SchemaNode) -> Self {
        let reference = ReferenceSchema::new(target, target_name, resolved);
        tracing::trace!(pointer = %reference.pointer(), "Bound reference");
        Self::unchecked(SchemaKind::Reference(reference))
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn name(&self) -> Option<&str> {
        self.attrs.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.attrs.description.as_deref()
    }

    pub fn example(&self) -> Option<&Value> {
        self.attrs.example.as_ref()
    }

    pub fn is_nullable(&self) -> bool {
        self.attrs.nullable
    }

    pub fn is_required(&self) -> bool {
        self.attrs.required
    }

    pub fn is_deprecated(&self) -> bool {
        self.attrs.deprecated
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.kind, SchemaKind::Reference(_))
    }

    /// Follow reference indirections down to a concrete node
    pub fn dereferenced(&self) -> &SchemaNode {
        let mut node = self;
        while let SchemaKind::Reference(reference) = &node.kind {
            node = reference.resolved();
        }
        node
    }

    /// Schema of a declared property, looking through references and allOf
    pub fn property(&self, key: &str) -> Option<&SchemaNode> {
        match self.dereferenced().kind() {
            SchemaKind::Object(object) => object.properties().get(key),
            SchemaKind::Composite(composite) => composite
                .members()
                .iter()
                .find_map(|(_, member)| member.property(key)),
            _ => None,
        }
    }

    fn with_attrs(&self, edit: impl FnOnce(&mut Attributes)) -> Self {
        let mut next = self.clone();
        edit(&mut next.attrs);
        next
    }

    fn reject_on_reference(&self, attribute: &'static str) -> SchemaResult<()> {
        match &self.kind {
            SchemaKind::Reference(reference) => Err(SchemaError::ReferenceSibling {
                attribute,
                target: reference.pointer(),
            }),
            _ => Ok(()),
        }
    }

    /// Set the name used as registry key or property key
    pub fn named(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.with_attrs(|attrs| attrs.name = Some(name))
    }

    /// Mark as required when embedded as a property
    pub fn required(&self) -> Self {
        self.with_attrs(|attrs| attrs.required = true)
    }

    pub fn optional(&self) -> Self {
        self.with_attrs(|attrs| attrs.required = false)
    }

    pub fn with_description(&self, description: impl Into<String>) -> SchemaResult<Self> {
        self.reject_on_reference("description")?;
        let description = description.into();
        Ok(self.with_attrs(|attrs| attrs.description = Some(description)))
    }

    pub fn nullable(&self) -> SchemaResult<Self> {
        self.reject_on_reference("nullable")?;
        Ok(self.with_attrs(|attrs| attrs.nullable = true))
    }

    pub fn deprecated(&self) -> SchemaResult<Self> {
        self.reject_on_reference("deprecated")?;
        Ok(self.with_attrs(|attrs| attrs.deprecated = true))
    }

    /// Attach an example; it must validate against this node
    pub fn with_example(&self, example: Value) -> SchemaResult<Self> {
        self.reject_on_reference("example")?;
        let errors = validate(self, &example);
        if !errors.is_empty() {
            return Err(SchemaError::InvalidExample {
                errors: ValidationErrors::from(errors),
            });
        }
        Ok(self.with_attrs(|attrs| attrs.example = Some(example)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_combinators_leave_receiver_untouched() {
        let base = SchemaNode::string();
        let described = base.with_description("A code").unwrap();
        let nullable = described.nullable().unwrap();

        assert_eq!(base.description(), None);
        assert!(!described.is_nullable());
        assert!(nullable.is_nullable());
        assert_eq!(nullable.description(), Some("A code"));
    }

    #[test]
    fn test_empty_object_rejected() {
        assert!(matches!(
            SchemaNode::object(ComponentRegistry::new()),
            Err(SchemaError::EmptyObject)
        ));
    }

    #[test]
    fn test_reference_rejects_sibling_attributes() {
        let reference = SchemaNode::reference(ReferenceTarget::Schema, "Pet", SchemaNode::string());
        assert!(matches!(
            reference.with_description("x"),
            Err(SchemaError::ReferenceSibling { attribute: "description", .. })
        ));
        assert!(reference.nullable().is_err());
        assert!(reference.deprecated().is_err());
        assert!(reference.with_example(json!("x")).is_err());

        // Placement attributes stay available.
        let property = reference.named("pet").required();
        assert_eq!(property.name(), Some("pet"));
        assert!(property.is_required());
    }

    #[test]
    fn test_example_must_match_schema() {
        let age = SchemaNode::new(IntegerSchema::new().minimum(18)).unwrap();
        assert!(age.with_example(json!(21)).is_ok());
        match age.with_example(json!(3)) {
            Err(SchemaError::InvalidExample { errors }) => assert_eq!(errors.len(), 1),
            other => panic!("expected InvalidExample, got {:?}", other),
        }
    }

    #[test]
    fn test_all_of_rejects_non_object_members() {
        let object = SchemaNode::object_from([SchemaNode::string().named("id")]).unwrap();
        assert!(SchemaNode::all_of([object.clone()]).is_ok());
        assert!(matches!(
            SchemaNode::all_of([object.clone(), SchemaNode::integer()]),
            Err(SchemaError::UnsupportedAllOfMember { kind: "integer", .. })
        ));

        let either = SchemaNode::one_of([object.clone(), SchemaNode::string()]).unwrap();
        match SchemaNode::all_of([object, either]) {
            Err(err @ SchemaError::UnsupportedAllOfMember { kind: "oneOf", .. }) => {
                assert_eq!(
                    err.to_string(),
                    "allOf member 'anonymous_oneOf_1' is a oneOf schema; allOf only merges object schemas"
                );
            }
            other => panic!("expected UnsupportedAllOfMember, got {:?}", other),
        }
    }

    #[test]
    fn test_array_item_bounds_must_be_ordered() {
        let items = ArraySchema::new(SchemaNode::string());
        assert!(SchemaNode::new(items.clone().min_items(1).max_items(1)).is_ok());
        match SchemaNode::new(items.min_items(3).max_items(1)) {
            Err(SchemaError::InvalidBounds { constraint, min, max }) => {
                assert_eq!(constraint, "items");
                assert_eq!(min, "3");
                assert_eq!(max, "1");
            }
            other => panic!("expected InvalidBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_dereferenced_follows_chain() {
        let target = SchemaNode::boolean();
        let inner = SchemaNode::reference(ReferenceTarget::Schema, "Flag", target.clone());
        let outer = SchemaNode::reference(ReferenceTarget::Schema, "Alias", inner);
        assert_eq!(outer.dereferenced(), &target);
    }
}
