//! Unit tests for loading components documents
//!
//! Documents are written to temporary files and read back through the
//! parser and resolver.

use oascontract_schema::loader::{load_components, DocumentResolver, LoaderError};
use oascontract_schema::{to_document, validate, ErrorKind, ParameterLocation, SchemaKind};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

const PETSTORE: &str = r#"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
          minLength: 1
        tag:
          type: string
          nullable: true
        owner:
          $ref: '#/components/schemas/Owner'
    Owner:
      type: object
      properties:
        email:
          type: string
          format: email
          example: jane@example.org
    Pets:
      type: array
      items:
        $ref: '#/components/schemas/Pet'
  parameters:
    Limit:
      name: limit
      in: query
      description: How many items to return
      schema:
        type: integer
        maximum: 100
"#;

#[cfg(test)]
mod document_loading {
    use super::*;

    #[test]
    fn test_load_yaml_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("petstore.yaml");
        fs::write(&path, PETSTORE).unwrap();

        let components = load_components(&path).unwrap();
        assert_eq!(components.schemas().len(), 3);

        let pet = components.schema("Pet").unwrap();
        assert_eq!(pet.name(), Some("Pet"));
        assert!(validate(pet, &json!({"id": 1, "name": "Rex", "tag": null})).is_empty());

        let errors = validate(pet, &json!({"id": 1, "name": "Rex", "owner": {"email": "nope"}}));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::InvalidFormat);
        assert_eq!(errors[0].to_string(), "Pet.owner.email: Value 'nope' is not a valid email");
    }

    #[test]
    fn test_references_render_as_pointers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("petstore.yaml");
        fs::write(&path, PETSTORE).unwrap();

        let components = load_components(&path).unwrap();
        let pets = to_document(components.schema("Pets").unwrap());
        assert_eq!(pets, json!({"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}));

        let doc = components.to_document();
        let names: Vec<&String> = doc["schemas"].as_object().unwrap().keys().collect();
        assert_eq!(names, vec!["Owner", "Pet", "Pets"]);
        assert_eq!(doc["schemas"]["Pet"]["required"], json!(["id", "name"]));
    }

    #[test]
    fn test_parameters_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("petstore.yml");
        fs::write(&path, PETSTORE).unwrap();

        let components = load_components(&path).unwrap();
        let limit = components.parameter("Limit").unwrap();
        assert_eq!(limit.name(), "limit");
        assert_eq!(limit.location(), ParameterLocation::Query);
        assert!(!limit.is_required());
        assert_eq!(limit.extract(Some("20")), Ok(json!(20)));
        assert!(limit.extract(Some("500")).is_err());
    }

    #[test]
    fn test_json_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flags.json");
        fs::write(&path, r#"{"schemas": {"Flag": {"type": "boolean", "deprecated": true}}}"#).unwrap();

        let components = load_components(&path).unwrap();
        let flag = components.schema("Flag").unwrap();
        assert!(matches!(flag.kind(), SchemaKind::Boolean));
        assert!(flag.is_deprecated());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("petstore.txt");
        fs::write(&path, PETSTORE).unwrap();
        assert!(matches!(load_components(&path), Err(LoaderError::UnsupportedFormat { .. })));
    }
}

#[cfg(test)]
mod resolution_errors {
    use super::*;

    #[test]
    fn test_unknown_reference() {
        let err = DocumentResolver::resolve(&json!({
            "components": {"schemas": {
                "Pet": {"type": "object", "properties": {"owner": {"$ref": "#/components/schemas/Owner"}}}
            }}
        }))
        .unwrap_err();
        match err {
            LoaderError::UnknownReference { reference, pointer } => {
                assert_eq!(reference, "#/components/schemas/Owner");
                assert_eq!(pointer, "#/components/schemas/Pet/properties/owner");
            }
            other => panic!("expected UnknownReference, got {:?}", other),
        }
    }

    #[test]
    fn test_external_reference_is_unknown() {
        let err = DocumentResolver::resolve(&json!({
            "schemas": {"Pet": {"$ref": "other.yaml#/Pet"}}
        }))
        .unwrap_err();
        assert!(matches!(err, LoaderError::UnknownReference { .. }));
    }

    #[test]
    fn test_cycle_through_two_components() {
        let err = DocumentResolver::resolve(&json!({
            "components": {"schemas": {
                "A": {"type": "array", "items": {"$ref": "#/components/schemas/B"}},
                "B": {"type": "array", "items": {"$ref": "#/components/schemas/A"}}
            }}
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Circular reference detected: A -> B -> A");
    }

    #[test]
    fn test_construction_failure_has_pointer() {
        let err = DocumentResolver::resolve(&json!({
            "schemas": {"Code": {"type": "string", "minLength": 5, "maxLength": 2}}
        }))
        .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidSchema { .. }));
        assert_eq!(err.pointer(), Some("#/components/schemas/Code"));
    }

    #[test]
    fn test_invalid_example_is_rejected() {
        let err = DocumentResolver::resolve(&json!({
            "schemas": {"Age": {"type": "integer", "minimum": 0, "example": -4}}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Example does not satisfy its own schema"));
    }

    #[test]
    fn test_unsupported_type() {
        let err = DocumentResolver::resolve(&json!({
            "schemas": {"Blob": {"type": "file"}}
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "Malformed schema at '#/components/schemas/Blob': unsupported type 'file'");
    }

    #[test]
    fn test_optional_path_parameter_rejected() {
        let err = DocumentResolver::resolve(&json!({
            "parameters": {"PetId": {"name": "petId", "in": "path", "required": false, "schema": {"type": "integer"}}}
        }))
        .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidSchema { .. }));
    }
}
