//! Cast command handler
//!
//! Turns a raw transport string into a typed value with either a schema
//! component or a parameter component, then reports what validation finds.

use super::{load_document, schema_component};
use crate::cli::CastArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use oascontract_schema::{cast_from_string, validate, Components, ValidationError};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, instrument};

/// Handle the cast command
#[instrument(skip(_config, output), fields(document = %args.document.display()))]
pub fn handle_cast(args: CastArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("cast_command");
    let components = load_document(&args.document)?;

    let (name, value, errors) = match (&args.parameter, &args.component) {
        (Some(parameter), _) => {
            let (value, errors) = cast_parameter(&components, parameter, args.raw.as_deref(), &args.document)?;
            (parameter.as_str(), value, errors)
        }
        (None, Some(component)) => {
            let raw = args
                .raw
                .as_deref()
                .ok_or_else(|| Error::invalid_args("--raw is required when casting with a schema component"))?;
            let node = schema_component(&components, component, &args.document)?;
            let value = cast_from_string(node, raw);
            let errors = validate(node, &value);
            (component.as_str(), value, errors)
        }
        (None, None) => {
            return Err(Error::invalid_args("either --component or --parameter is required"));
        }
    };

    debug!(%value, errors = errors.len(), "Cast finished");
    output.report(&ValidationReport {
        component: name,
        valid: errors.is_empty(),
        value: Some(&value),
        errors: &errors,
    })?;

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidData {
            count: errors.len(),
        })
    }
}

/// Extract a parameter, keeping the cast value even when it is invalid
fn cast_parameter(
    components: &Components,
    name: &str,
    raw: Option<&str>,
    document: &Path,
) -> Result<(Value, Vec<ValidationError>)> {
    let parameter = components.parameter(name).ok_or_else(|| Error::UnknownComponent {
        section: "parameter",
        name: name.to_string(),
        document: document.to_path_buf(),
    })?;

    Ok(match parameter.extract(raw) {
        Ok(value) => (value, Vec::new()),
        Err(errors) => {
            let value = raw
                .map(|raw| cast_from_string(parameter.schema(), raw))
                .unwrap_or(Value::Null);
            (value, errors)
        }
    })
}
