// Tests for output formatting
//
// These tests cover the human rendering of validation errors and the
// machine formats of a validation report.

use super::*;
use oascontract_schema::{validate, SchemaNode};
use serde_json::json;
use crate::output::capture::SharedBuffer;

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn pet_errors() -> Vec<ValidationError> {
    let pet = SchemaNode::object_from([
        SchemaNode::string().named("name").required(),
        SchemaNode::any_of([SchemaNode::string(), SchemaNode::integer()])
            .unwrap()
            .named("id"),
    ])
    .unwrap();
    validate(&pet, &json!({"id": true}))
}

#[test]
fn test_validation_errors_human() {
    let errors = ValidationErrors::from(pet_errors());
    let formatted = format_validation_errors_human(&errors);

    assert!(formatted.contains("❌ Validation Failed - 2 Error(s)"));
    assert!(formatted.contains("1. 📍 name: Required field 'name' is missing [is_required_field]"));
    assert!(formatted.contains("2. 📍 id: Value does not match any of the 2 allowed schemas [no_member_matched]"));
    assert!(formatted.contains("↳ anonymous_string_0:"));
    assert!(formatted.contains("↳ anonymous_integer_1:"));
    assert!(formatted.contains("Incorrect type supplied: expected integer, got boolean [incorrect_type_supplied]"));
}

#[test]
fn test_plain_error_has_no_location() {
    let error = ValidationError::plain(
        oascontract_schema::ErrorKind::KeyNotPartOfObject,
        "Key 'extra' is not part of the object",
    );
    let formatted = format_validation_error_human(&error, 0);
    assert_eq!(formatted, "Key 'extra' is not part of the object [key_not_part_of_object]\n");
}

#[test]
fn test_validation_errors_json() {
    let errors = ValidationErrors::from(pet_errors());
    let formatted = OutputFormat::Json.format_validation_errors(&errors).unwrap();
    let parsed: Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(parsed["errors"][0]["type"], "field");
    assert_eq!(parsed["errors"][0]["kind"], "is_required_field");
    assert_eq!(parsed["errors"][0]["path"], json!(["name"]));
    assert!(parsed["errors"][0].get("branches").is_none());
    assert_eq!(parsed["errors"][1]["branches"].as_object().unwrap().len(), 2);
}

#[test]
fn test_report_machine_formats() {
    let errors = pet_errors();
    let report = ValidationReport {
        component: "Pet",
        valid: false,
        value: None,
        errors: &errors,
    };

    let (mut out, buffer) = writer(OutputFormat::JsonPretty, false);
    out.report(&report).unwrap();
    let parsed: Value = serde_json::from_str(&buffer.contents()).unwrap();
    assert_eq!(parsed["component"], "Pet");
    assert_eq!(parsed["valid"], false);
    assert!(parsed.get("value").is_none());
    assert_eq!(parsed["errors"].as_array().unwrap().len(), 2);

    let (mut out, buffer) = writer(OutputFormat::Yaml, false);
    out.report(&report).unwrap();
    let parsed: Value = serde_yaml::from_str(&buffer.contents()).unwrap();
    assert_eq!(parsed["valid"], false);
}

#[test]
fn test_report_human_success() {
    let value = json!(3);
    let report = ValidationReport {
        component: "Count",
        valid: true,
        value: Some(&value),
        errors: &[],
    };

    let (mut out, buffer) = writer(OutputFormat::Human, false);
    out.report(&report).unwrap();
    let contents = buffer.contents();
    assert!(contents.contains("=== Value ==="));
    assert!(contents.contains("✅ Value satisfies 'Count'"));
}

#[test]
fn test_quiet_suppresses_messages_but_not_errors() {
    let (mut out, buffer) = writer(OutputFormat::Human, true);
    out.info("loading").unwrap();
    out.success("done").unwrap();
    out.validation_errors(&ValidationErrors::from(pet_errors())).unwrap();
    assert!(buffer.contents().starts_with("❌ Validation Failed - 2 Error(s)"));
}

#[test]
fn test_messages_skipped_for_machine_formats() {
    let (mut out, buffer) = writer(OutputFormat::Json, false);
    out.info("loading").unwrap();
    out.section("Value").unwrap();
    out.data(&json!({"a": 1})).unwrap();
    assert_eq!(buffer.contents(), "{\"a\":1}\n");
}
