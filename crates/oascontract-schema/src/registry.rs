//! Ordered, name-unique collection of schema nodes
//!
//! The same type backs the properties of an object, the members of a
//! composite and the `schemas` section of a components document. Insertion
//! order is kept; the components rendering sorts by name instead.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::document::to_document;
use crate::error::{SchemaError, SchemaResult};
use crate::node::SchemaNode;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Name → node, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRegistry {
    entries: IndexMap<String, Arc<SchemaNode>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from named nodes; fails on the first unnamed or duplicate node
    pub fn from_nodes<I>(nodes: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = SchemaNode>,
    {
        let mut registry = Self::new();
        for node in nodes {
            registry.insert(node)?;
        }
        Ok(registry)
    }

    /// Copy of this registry with `node` appended
    pub fn with(&self, node: SchemaNode) -> SchemaResult<Self> {
        let mut next = self.clone();
        next.insert(node)?;
        Ok(next)
    }

    pub(crate) fn insert(&mut self, node: SchemaNode) -> SchemaResult<()> {
        let name = node.name().ok_or(SchemaError::UnnamedComponent)?.to_string();
        if self.entries.contains_key(&name) {
            return Err(SchemaError::DuplicateComponent { name });
        }
        self.entries.insert(name, Arc::new(node));
        Ok(())
    }

    pub(crate) fn insert_shared(&mut self, name: &str, node: &Arc<SchemaNode>) {
        self.entries.insert(name.to_string(), Arc::clone(node));
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries.get(name).map(Arc::as_ref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node.as_ref()))
    }

    pub(crate) fn iter_shared(&self) -> impl Iterator<Item = (&str, &Arc<SchemaNode>)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Names whose node carries the `required` flag, in insertion order
    pub fn required_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_required())
            .map(|(name, _)| name)
            .collect()
    }

    /// Inline rendering (object `properties`): insertion order
    pub fn to_properties_document(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(name, node)| (name.to_string(), to_document(node)))
            .collect();
        Value::Object(map)
    }

    /// Components-section rendering: sorted by name
    pub fn to_components_document(&self) -> Value {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        let map: Map<String, Value> = names
            .into_iter()
            .filter_map(|name| self.get(name).map(|node| (name.to_string(), to_document(node))))
            .collect();
        Value::Object(map)
    }
}
