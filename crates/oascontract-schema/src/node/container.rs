//! Container schema payloads: array, map and object
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::SchemaNode;
use crate::error::{SchemaError, SchemaResult};
use crate::registry::ComponentRegistry;
use std::sync::Arc;

/// Homogeneous sequence of `items`
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub(crate) items: Arc<SchemaNode>,
    pub(crate) unique_items: bool,
    pub(crate) min_items: Option<usize>,
    pub(crate) max_items: Option<usize>,
}

impl ArraySchema {
    pub fn new(items: SchemaNode) -> Self {
        Self {
            items: Arc::new(items),
            unique_items: false,
            min_items: None,
            max_items: None,
        }
    }

    pub fn unique_items(mut self) -> Self {
        self.unique_items = true;
        self
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn items(&self) -> &SchemaNode {
        &self.items
    }

    pub fn is_unique(&self) -> bool {
        self.unique_items
    }

    pub fn get_min_items(&self) -> Option<usize> {
        self.min_items
    }

    pub fn get_max_items(&self) -> Option<usize> {
        self.max_items
    }

    pub(crate) fn check(&self) -> SchemaResult<()> {
        match (self.min_items, self.max_items) {
            (Some(min), Some(max)) if min > max => {
                Err(SchemaError::invalid_bounds("items", min, max))
            }
            _ => Ok(()),
        }
    }
}

/// JSON object with arbitrary keys and a fixed value schema
#[derive(Debug, Clone, PartialEq)]
pub struct MapSchema {
    pub(crate) values: Arc<SchemaNode>,
}

impl MapSchema {
    pub fn new(values: SchemaNode) -> Self {
        Self {
            values: Arc::new(values),
        }
    }

    pub fn values(&self) -> &SchemaNode {
        &self.values
    }
}

/// JSON object with declared properties
///
/// Required property names are not stored: they are the properties whose own
/// `required` flag is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub(crate) properties: ComponentRegistry,
}

impl ObjectSchema {
    pub fn new(properties: ComponentRegistry) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &ComponentRegistry {
        &self.properties
    }

    /// Names of required properties, in declaration order
    pub fn required_names(&self) -> Vec<&str> {
        self.properties.required_names()
    }

    pub(crate) fn check(&self) -> SchemaResult<()> {
        if self.properties.is_empty() {
            return Err(SchemaError::EmptyObject);
        }
        Ok(())
    }
}
