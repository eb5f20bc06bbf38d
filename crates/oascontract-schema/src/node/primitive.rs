//! Primitive schema payloads: string, integer and number
//!
//! Payload setters only record values. Bounds and enumeration checks run when
//! the payload is turned into a node through [`SchemaNode::new`](super::SchemaNode::new).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use indexmap::IndexSet;
use std::fmt;

/// Well-known `format` tags for string schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    Date,
    DateTime,
    Password,
    Byte,
    Binary,
    Email,
    Uuid,
    Uri,
    Hostname,
    Ipv4,
    Ipv6,
}

impl StringFormat {
    /// All supported formats
    pub const ALL: [StringFormat; 11] = [
        StringFormat::Date,
        StringFormat::DateTime,
        StringFormat::Password,
        StringFormat::Byte,
        StringFormat::Binary,
        StringFormat::Email,
        StringFormat::Uuid,
        StringFormat::Uri,
        StringFormat::Hostname,
        StringFormat::Ipv4,
        StringFormat::Ipv6,
    ];

    /// The tag as written in the document
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Date => "date",
            StringFormat::DateTime => "date-time",
            StringFormat::Password => "password",
            StringFormat::Byte => "byte",
            StringFormat::Binary => "binary",
            StringFormat::Email => "email",
            StringFormat::Uuid => "uuid",
            StringFormat::Uri => "uri",
            StringFormat::Hostname => "hostname",
            StringFormat::Ipv4 => "ipv4",
            StringFormat::Ipv6 => "ipv6",
        }
    }

    /// Parse a document tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == tag)
    }
}

impl fmt::Display for StringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `format` tags for integer schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerFormat {
    Int32,
    Int64,
}

impl IntegerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegerFormat::Int32 => "int32",
            IntegerFormat::Int64 => "int64",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int32" => Some(IntegerFormat::Int32),
            "int64" => Some(IntegerFormat::Int64),
            _ => None,
        }
    }
}

impl fmt::Display for IntegerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `format` tags for number schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Float,
    Double,
}

impl NumberFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Float => "float",
            NumberFormat::Double => "double",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "float" => Some(NumberFormat::Float),
            "double" => Some(NumberFormat::Double),
            _ => None,
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub(crate) format: Option<StringFormat>,
    pub(crate) enumeration: Option<IndexSet<String>>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: StringFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Restrict the value to an ordered set of literals
    pub fn enumeration<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn get_format(&self) -> Option<StringFormat> {
        self.format
    }

    pub fn get_enumeration(&self) -> Option<&IndexSet<String>> {
        self.enumeration.as_ref()
    }

    pub fn get_min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn get_max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub(crate) fn check(&self) -> SchemaResult<()> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(SchemaError::invalid_bounds("length", min, max));
            }
        }

        if let Some(values) = &self.enumeration {
            if values.is_empty() {
                return Err(SchemaError::EmptyEnum);
            }
            // Enum literals must themselves satisfy length and format.
            for value in values {
                let errors = crate::validation::primitive::check_string_constraints(self, value, false);
                if let Some(first) = errors.first() {
                    return Err(SchemaError::InvalidEnumValue {
                        value: value.clone(),
                        reason: first.message().to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Integer constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegerSchema {
    pub(crate) minimum: Option<i64>,
    pub(crate) maximum: Option<i64>,
    pub(crate) format: Option<IntegerFormat>,
}

impl IntegerSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimum(mut self, min: i64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub fn maximum(mut self, max: i64) -> Self {
        self.maximum = Some(max);
        self
    }

    pub fn format(mut self, format: IntegerFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn get_minimum(&self) -> Option<i64> {
        self.minimum
    }

    pub fn get_maximum(&self) -> Option<i64> {
        self.maximum
    }

    pub fn get_format(&self) -> Option<IntegerFormat> {
        self.format
    }

    pub(crate) fn check(&self) -> SchemaResult<()> {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) if min > max => {
                Err(SchemaError::invalid_bounds("integer range", min, max))
            }
            _ => Ok(()),
        }
    }
}

/// Number constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) format: Option<NumberFormat>,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub fn maximum(mut self, max: f64) -> Self {
        self.maximum = Some(max);
        self
    }

    pub fn format(mut self, format: NumberFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn get_minimum(&self) -> Option<f64> {
        self.minimum
    }

    pub fn get_maximum(&self) -> Option<f64> {
        self.maximum
    }

    pub fn get_format(&self) -> Option<NumberFormat> {
        self.format
    }

    pub(crate) fn check(&self) -> SchemaResult<()> {
        for (constraint, bound) in [("minimum", self.minimum), ("maximum", self.maximum)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(SchemaError::NonFiniteBound { constraint, value });
                }
            }
        }
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) if min > max => {
                Err(SchemaError::invalid_bounds("number range", min, max))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_format_tags() {
        for format in StringFormat::ALL {
            assert_eq!(StringFormat::from_tag(format.as_str()), Some(format));
        }
        assert_eq!(StringFormat::from_tag("date-time"), Some(StringFormat::DateTime));
        assert_eq!(StringFormat::from_tag("color"), None);
    }

    #[test]
    fn test_string_bounds() {
        assert!(StringSchema::new().min_length(2).max_length(5).check().is_ok());
        assert!(matches!(
            StringSchema::new().min_length(6).max_length(5).check(),
            Err(SchemaError::InvalidBounds { constraint: "length", .. })
        ));
    }

    #[test]
    fn test_enum_values_checked_against_own_constraints() {
        let schema = StringSchema::new().max_length(3).enumeration(["ok", "toolong"]);
        match schema.check() {
            Err(SchemaError::InvalidEnumValue { value, .. }) => assert_eq!(value, "toolong"),
            other => panic!("expected InvalidEnumValue, got {:?}", other),
        }

        let schema = StringSchema::new().format(StringFormat::Uuid).enumeration(["nope"]);
        assert!(matches!(schema.check(), Err(SchemaError::InvalidEnumValue { .. })));

        let empty: [&str; 0] = [];
        assert!(matches!(
            StringSchema::new().enumeration(empty).check(),
            Err(SchemaError::EmptyEnum)
        ));
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(IntegerSchema::new().minimum(1).maximum(1).check().is_ok());
        assert!(IntegerSchema::new().minimum(2).maximum(1).check().is_err());
        assert!(NumberSchema::new().minimum(0.5).maximum(0.25).check().is_err());
        assert!(matches!(
            NumberSchema::new().minimum(f64::NAN).check(),
            Err(SchemaError::NonFiniteBound { constraint: "minimum", .. })
        ));
    }
}
