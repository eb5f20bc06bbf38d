//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialised
//! human rendering for validation errors and their anyOf/oneOf branches.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use oascontract_schema::{format_path, ValidationError, ValidationErrors};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format validation errors with nested branch reporting
    fn format_validation_errors(&self, errors: &ValidationErrors) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_validation_errors(&self, errors: &ValidationErrors) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(errors)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(errors)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(errors)?),
            OutputFormat::Human => Ok(format_validation_errors_human(errors)),
        }
    }
}

/// Outcome of checking one or more values, as printed by `validate` and `cast`
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub component: &'a str,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a Value>,
    pub errors: &'a [ValidationError],
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Writing data");

        if self.format == OutputFormat::Yaml {
            // serde_yaml already ends with a newline
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write validation errors with specialized formatting
    pub fn validation_errors(&mut self, errors: &ValidationErrors) -> Result<()> {
        let formatted = self.format.format_validation_errors(errors)?;
        self.writeln(formatted.trim_end())
    }

    /// Write the outcome of a check
    ///
    /// Machine formats get the whole report; human output gets a summary
    /// line and the error list.
    pub fn report(&mut self, report: &ValidationReport<'_>) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(report);
        }

        if let Some(value) = report.value {
            self.section("Value")?;
            self.writeln(&serde_json::to_string_pretty(value)?)?;
        }

        if report.valid {
            self.success(&format!("✅ Value satisfies '{}'", report.component))
        } else {
            let errors = ValidationErrors::from(report.errors.to_vec());
            self.validation_errors(&errors)
        }
    }
}

/// Format validation errors for human reading
fn format_validation_errors_human(errors: &ValidationErrors) -> String {
    let mut output = String::new();

    output.push_str(&format!("❌ Validation Failed - {} Error(s)\n\n", errors.len()));

    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("{}. ", i + 1));
        output.push_str(&format_validation_error_human(error, 0));
    }

    output
}

/// Format a single validation error for human reading
fn format_validation_error_human(error: &ValidationError, depth: usize) -> String {
    let indent = "   ".repeat(depth);
    let mut output = String::new();

    if error.is_field() {
        output.push_str(&format!("📍 {}: ", format_path(error.path())));
    }
    output.push_str(&format!("{} [{}]\n", error.message(), error.kind()));

    for (member, branch_errors) in error.branches() {
        output.push_str(&format!("{}   ↳ {}:\n", indent, member));
        for branch_error in branch_errors {
            output.push_str(&format!("{}      • ", indent));
            output.push_str(&format_validation_error_human(branch_error, depth + 2));
        }
    }

    output
}


#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
