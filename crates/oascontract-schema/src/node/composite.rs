//! allOf / anyOf / oneOf
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{SchemaKind, SchemaNode};
use crate::error::{SchemaError, SchemaResult};
use crate::registry::ComponentRegistry;
use std::fmt;

/// Which combination rule a composite applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// Value must satisfy the merged properties of every member
    AllOf,
    /// Value must satisfy at least one member
    AnyOf,
    /// Value must satisfy exactly one member
    OneOf,
}

impl CompositeKind {
    /// Document keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            CompositeKind::AllOf => "allOf",
            CompositeKind::AnyOf => "anyOf",
            CompositeKind::OneOf => "oneOf",
        }
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Composite payload
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSchema {
    pub(crate) kind: CompositeKind,
    pub(crate) members: ComponentRegistry,
}

impl CompositeSchema {
    /// Build a composite from members in declaration order.
    ///
    /// Unnamed members get a placeholder name (`anonymous_<type>_<index>`) so
    /// the member registry stays name-unique. The placeholder only identifies
    /// the branch inside this composite, e.g. as a key of an anyOf error map.
    pub fn new<I>(kind: CompositeKind, members: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = SchemaNode>,
    {
        let mut registry = ComponentRegistry::new();
        for (index, member) in members.into_iter().enumerate() {
            let member = if member.name().is_some() {
                member
            } else {
                let name = placeholder_name(&registry, &member, index);
                member.named(name)
            };
            registry.insert(member)?;
        }
        Ok(Self {
            kind,
            members: registry,
        })
    }

    pub fn kind(&self) -> CompositeKind {
        self.kind
    }

    pub fn members(&self) -> &ComponentRegistry {
        &self.members
    }

    /// Union of the properties of every allOf member, first declaration wins
    pub fn merged_properties(&self) -> ComponentRegistry {
        let mut merged = ComponentRegistry::new();
        collect_properties(&self.members, &mut merged);
        merged
    }

    pub(crate) fn check(&self) -> SchemaResult<()> {
        if self.members.is_empty() {
            return Err(SchemaError::EmptyComposite {
                kind: self.kind.keyword(),
            });
        }

        if self.kind == CompositeKind::AllOf {
            for (name, member) in self.members.iter() {
                match member.dereferenced().kind() {
                    SchemaKind::Object(_)
                    | SchemaKind::Composite(CompositeSchema {
                        kind: CompositeKind::AllOf,
                        ..
                    }) => {}
                    other => {
                        return Err(SchemaError::UnsupportedAllOfMember {
                            member: name.to_string(),
                            kind: other.type_name(),
                        })
                    }
                }
            }
        }

        Ok(())
    }
}

fn placeholder_name(registry: &ComponentRegistry, member: &SchemaNode, index: usize) -> String {
    let base = format!("anonymous_{}_{}", member.type_name(), index);
    let mut candidate = base.clone();
    let mut suffix = 1;
    while registry.contains(&candidate) {
        candidate = format!("{}_{}", base, suffix);
        suffix += 1;
    }
    candidate
}

fn collect_properties(members: &ComponentRegistry, merged: &mut ComponentRegistry) {
    for (_, member) in members.iter() {
        match member.dereferenced().kind() {
            SchemaKind::Object(object) => {
                for (name, property) in object.properties().iter_shared() {
                    if !merged.contains(name) {
                        merged.insert_shared(name, property);
                    }
                }
            }
            SchemaKind::Composite(composite) if composite.kind == CompositeKind::AllOf => {
                collect_properties(&composite.members, merged);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_names_are_unique() {
        let composite = CompositeSchema::new(
            CompositeKind::OneOf,
            vec![SchemaNode::string(), SchemaNode::string(), SchemaNode::integer()],
        )
        .unwrap();
        let names: Vec<&str> = composite.members().names().collect();
        assert_eq!(
            names,
            vec!["anonymous_string_0", "anonymous_string_1", "anonymous_integer_2"]
        );
    }

    #[test]
    fn test_placeholder_avoids_explicit_names() {
        let composite = CompositeSchema::new(
            CompositeKind::AnyOf,
            vec![
                SchemaNode::boolean().named("anonymous_string_1"),
                SchemaNode::string(),
            ],
        )
        .unwrap();
        assert!(composite.members().contains("anonymous_string_1_1"));
    }

    #[test]
    fn test_empty_composite_rejected() {
        let composite = CompositeSchema::new(CompositeKind::OneOf, Vec::new()).unwrap();
        assert!(matches!(
            composite.check(),
            Err(SchemaError::EmptyComposite { kind: "oneOf" })
        ));
    }
}
