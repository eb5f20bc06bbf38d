//! Error types for document loading
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures while reading a document or turning it into schema nodes
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Neither `components` nor a bare `schemas`/`parameters` section
    #[error("Document has no components section")]
    MissingComponents,

    /// `$ref` to something that is not in the document
    #[error("Unresolved reference '{reference}' at '{pointer}'")]
    UnknownReference { reference: String, pointer: String },

    /// Schemas that reference each other in a loop
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// Schema object the loader cannot read
    #[error("Malformed schema at '{pointer}': {reason}")]
    MalformedSchema { pointer: String, reason: String },

    /// Schema object that reads fine but breaks a construction rule
    #[error("Invalid schema at '{pointer}': {source}")]
    InvalidSchema {
        pointer: String,
        source: SchemaError,
    },
}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::from("<unknown>"),
            source: error,
        }
    }
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a circular reference error from the chain of component names
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    pub fn malformed(pointer: &str, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            pointer: pointer.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_schema(pointer: &str, source: SchemaError) -> Self {
        Self::InvalidSchema {
            pointer: pointer.to_string(),
            source,
        }
    }

    /// Get the file path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            _ => None,
        }
    }

    /// JSON pointer of the offending schema, if any
    pub fn pointer(&self) -> Option<&str> {
        match self {
            Self::UnknownReference { pointer, .. }
            | Self::MalformedSchema { pointer, .. }
            | Self::InvalidSchema { pointer, .. } => Some(pointer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("pets.yaml");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), Some(&path));

        let circular_err = LoaderError::circular_reference(&["A".to_string(), "B".to_string(), "A".to_string()]);
        assert_eq!(circular_err.to_string(), "Circular reference detected: A -> B -> A");
        assert_eq!(circular_err.path(), None);
    }

    #[test]
    fn test_pointer_context() {
        let err = LoaderError::invalid_schema("#/components/schemas/Pet", SchemaError::EmptyObject);
        assert_eq!(err.pointer(), Some("#/components/schemas/Pet"));
        assert_eq!(
            err.to_string(),
            "Invalid schema at '#/components/schemas/Pet': Object schema must declare at least one property"
        );
    }
}
