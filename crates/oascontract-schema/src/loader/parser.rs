//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            }
        } else {
            Err(LoaderError::unsupported_format(path.to_path_buf()))
        }
    }
}

/// Reads documents and values into `serde_json::Value`
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        tracing::debug!(path = %path.display(), ?format, "Parsing file");
        self.parse_content(&content, format, path)
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // YAML errors first, then conversion into the JSON model.
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Read a file whose extension may not name its format
    pub fn parse_file_with_fallback(&self, path: &Path) -> LoaderResult<(Value, Format)> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        self.parse_with_fallback(&content, path)
    }

    /// Try the extension's format, then JSON, then YAML
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(format) = Format::from_path(path) {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("pets.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("pets.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("pets.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("pets.txt")).is_err());
        assert!(Format::from_path(Path::new("pets")).is_err());
    }

    #[test]
    fn test_yaml_parsing() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("pets.yaml");

        let yaml_content = r#"
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
"#;

        fs::write(&file_path, yaml_content)?;

        let result = SchemaParser::new().parse_file(&file_path)?;
        assert_eq!(result["components"]["schemas"]["Pet"]["type"], "object");

        Ok(())
    }

    #[test]
    fn test_json_parsing_error_has_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.json");
        fs::write(&file_path, "{\"schemas\": ").unwrap();

        let err = SchemaParser::new().parse_file(&file_path).unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));
        assert_eq!(err.path(), Some(&file_path));
    }

    #[test]
    fn test_fallback_parsing() -> LoaderResult<()> {
        let parser = SchemaParser::new();

        let (value, format) = parser.parse_with_fallback(r#"{"id": 7}"#, Path::new("value.txt"))?;
        assert_eq!(format, Format::Json);
        assert_eq!(value["id"], 7);

        let (value, format) = parser.parse_with_fallback("id: 7\nname: rex", Path::new("value.txt"))?;
        assert_eq!(format, Format::Yaml);
        assert_eq!(value["name"], "rex");

        Ok(())
    }
}
