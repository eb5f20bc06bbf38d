//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use oascontract_schema::loader::LoaderError;
use oascontract_schema::SchemaError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The components document could not be loaded
    #[error("{0}")]
    Loader(#[from] LoaderError),

    /// A schema or component could not be built
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Checked data did not satisfy its schema
    #[error("{count} validation error(s) found")]
    InvalidData { count: usize },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Named schema or parameter missing from the document
    #[error("No {section} named '{name}' in {}", document.display())]
    UnknownComponent {
        section: &'static str,
        name: String,
        document: PathBuf,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument combination
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::InvalidData { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::Loader(_) => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::UnknownComponent { .. } => 7,
            Self::Schema(_) => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    // The errors themselves were already printed by the handler
    if let Error::InvalidData { .. } = error {
        return format!("{}", error);
    }

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_exit_code() {
        let err = Error::InvalidData { count: 3 };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(format_error(&err, false), "3 validation error(s) found");
    }

    #[test]
    fn test_loader_error_conversion() {
        let err: Error = LoaderError::unsupported_format(PathBuf::from("petstore.txt")).into();
        assert_eq!(err.exit_code(), 4);
        assert!(format_error(&err, false).starts_with("Error: "));
    }

    #[test]
    fn test_unknown_component_message() {
        let err = Error::UnknownComponent {
            section: "schema",
            name: "Pet".to_string(),
            document: PathBuf::from("api.yaml"),
        };
        assert_eq!(err.to_string(), "No schema named 'Pet' in api.yaml");
        assert!(!err.should_show_help());
        assert!(Error::invalid_args("x").should_show_help());
    }
}
