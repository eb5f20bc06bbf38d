//! Reference indirection
//!
//! A reference serializes as a `$ref` pointer but carries the node it points
//! to, bound when the reference is built. Validation and casting go straight
//! to that node; nothing is looked up by name afterwards.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::SchemaNode;
use std::fmt;
use std::sync::Arc;

/// Section of `#/components` a reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceTarget {
    Schema,
    Parameter,
    Response,
    RequestBody,
    Header,
    Example,
    Link,
    SecurityScheme,
}

impl ReferenceTarget {
    /// Name of the components section
    pub fn section(&self) -> &'static str {
        match self {
            ReferenceTarget::Schema => "schemas",
            ReferenceTarget::Parameter => "parameters",
            ReferenceTarget::Response => "responses",
            ReferenceTarget::RequestBody => "requestBodies",
            ReferenceTarget::Header => "headers",
            ReferenceTarget::Example => "examples",
            ReferenceTarget::Link => "links",
            ReferenceTarget::SecurityScheme => "securitySchemes",
        }
    }

    /// Inverse of [`section`](Self::section)
    pub fn from_section(section: &str) -> Option<Self> {
        let target = match section {
            "schemas" => ReferenceTarget::Schema,
            "parameters" => ReferenceTarget::Parameter,
            "responses" => ReferenceTarget::Response,
            "requestBodies" => ReferenceTarget::RequestBody,
            "headers" => ReferenceTarget::Header,
            "examples" => ReferenceTarget::Example,
            "links" => ReferenceTarget::Link,
            "securitySchemes" => ReferenceTarget::SecurityScheme,
            _ => return None,
        };
        Some(target)
    }
}

impl fmt::Display for ReferenceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// Reference payload
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSchema {
    pub(crate) target: ReferenceTarget,
    pub(crate) target_name: String,
    pub(crate) resolved: Arc<SchemaNode>,
}

impl ReferenceSchema {
    pub fn new(target: ReferenceTarget, target_name: impl Into<String>, resolved: SchemaNode) -> Self {
        Self {
            target,
            target_name: target_name.into(),
            resolved: Arc::new(resolved),
        }
    }

    pub fn target(&self) -> ReferenceTarget {
        self.target
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn resolved(&self) -> &SchemaNode {
        &self.resolved
    }

    /// `#/components/<section>/<name>`
    pub fn pointer(&self) -> String {
        format!("#/components/{}/{}", self.target.section(), self.target_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer() {
        let reference = ReferenceSchema::new(ReferenceTarget::RequestBody, "NewPet", SchemaNode::string());
        assert_eq!(reference.pointer(), "#/components/requestBodies/NewPet");
    }

    #[test]
    fn test_section_round_trip() {
        for target in [
            ReferenceTarget::Schema,
            ReferenceTarget::Parameter,
            ReferenceTarget::Response,
            ReferenceTarget::RequestBody,
            ReferenceTarget::Header,
            ReferenceTarget::Example,
            ReferenceTarget::Link,
            ReferenceTarget::SecurityScheme,
        ] {
            assert_eq!(ReferenceTarget::from_section(target.section()), Some(target));
        }
        assert_eq!(ReferenceTarget::from_section("callbacks"), None);
    }
}
