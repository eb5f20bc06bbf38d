//! Validation command handler

use super::{load_document, schema_component};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use oascontract_schema::loader::SchemaParser;
use oascontract_schema::{validate, validate_batch, SchemaNode, ValidationError};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Handle the validate command
#[instrument(skip(config, output), fields(document = %args.document.display(), component = %args.component))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &args.component);
    output.info(&format!(
        "Validating {} against '{}'",
        args.value_file.display(),
        args.component
    ))?;

    let components = load_document(&args.document)?;
    let node = schema_component(&components, &args.component, &args.document)?;

    if !args.value_file.exists() {
        return Err(Error::FileNotFound {
            path: args.value_file.clone(),
        });
    }
    let (value, format) = SchemaParser::new().parse_file_with_fallback(&args.value_file)?;
    debug!(?format, "Value file parsed");

    let errors = if args.batch {
        check_batch(&args, config, node, &value)?
    } else {
        validate(node, &value)
    };

    info!(errors = errors.len(), "Validation finished");
    output.report(&ValidationReport {
        component: &args.component,
        valid: errors.is_empty(),
        value: None,
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

/// Check every element of an array value, honouring the batch settings
fn check_batch(
    args: &ValidateArgs,
    config: &Config,
    node: &SchemaNode,
    value: &Value,
) -> Result<Vec<ValidationError>> {
    let values = value.as_array().ok_or_else(|| {
        Error::invalid_args(format!(
            "--batch expects {} to hold an array of values",
            args.value_file.display()
        ))
    })?;

    let mut batch_config = config.to_validation_config();
    if args.fail_fast {
        batch_config = batch_config.with_fail_fast();
    }
    if let Some(max_errors) = args.max_errors {
        batch_config = batch_config.with_max_errors(max_errors);
    }

    debug!(values = values.len(), config = ?batch_config, "Validating batch");
    Ok(match validate_batch(node, values, &batch_config) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.errors,
    })
}
