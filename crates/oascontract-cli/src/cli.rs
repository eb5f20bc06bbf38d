//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// oascontract - typed OpenAPI component schemas from the command line
///
/// Load the schemas and parameters of an OpenAPI components document, check
/// values against them, cast raw transport strings and render the
/// normalised document.
#[derive(Parser, Debug)]
#[command(
    name = "oascontract",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "OASCONTRACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a JSON or YAML value against a component schema
    Validate(ValidateArgs),

    /// Cast a raw transport string with a component schema
    Cast(CastArgs),

    /// Print the normalised components document
    Render(RenderArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the components document (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Name of the schema under components/schemas
    #[arg(long, value_name = "NAME")]
    pub component: String,

    /// Path to the value to check (JSON or YAML)
    #[arg(value_name = "VALUE_FILE")]
    pub value_file: PathBuf,

    /// Treat the value file as an array of values checked one by one
    #[arg(long)]
    pub batch: bool,

    /// Stop at the first invalid value (batch mode)
    #[arg(long, requires = "batch")]
    pub fail_fast: bool,

    /// Maximum number of errors to report (batch mode, 0 = unlimited)
    #[arg(long, value_name = "COUNT", requires = "batch")]
    pub max_errors: Option<usize>,
}

/// Arguments for the cast command
#[derive(Parser, Debug)]
pub struct CastArgs {
    /// Path to the components document (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Name of the schema under components/schemas
    #[arg(long, value_name = "NAME", conflicts_with = "parameter", required_unless_present = "parameter")]
    pub component: Option<String>,

    /// Name of the parameter under components/parameters
    #[arg(long, value_name = "NAME")]
    pub parameter: Option<String>,

    /// Raw string as it arrived in a path, query, header or cookie
    #[arg(long, value_name = "STRING")]
    pub raw: Option<String>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to the components document (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Render a single schema instead of the whole components section
    #[arg(long, value_name = "NAME")]
    pub component: Option<String>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse a format name as written in a configuration file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Render(RenderArgs {
                document: PathBuf::from("petstore.yaml"),
                component: None,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_arguments() {
        let cli = Cli::parse_from([
            "oascontract",
            "-o",
            "json-pretty",
            "validate",
            "petstore.yaml",
            "--component",
            "Pet",
            "pets.json",
            "--batch",
            "--max-errors",
            "5",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.component, "Pet");
                assert_eq!(args.value_file, PathBuf::from("pets.json"));
                assert!(args.batch);
                assert_eq!(args.max_errors, Some(5));
            }
            other => panic!("expected validate, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_fast_requires_batch() {
        let result = Cli::try_parse_from([
            "oascontract",
            "validate",
            "petstore.yaml",
            "--component",
            "Pet",
            "pet.json",
            "--fail-fast",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cast_needs_a_target() {
        let result = Cli::try_parse_from(["oascontract", "cast", "petstore.yaml", "--raw", "1"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["oascontract", "cast", "petstore.yaml", "--parameter", "Limit", "--raw", "20"]);
        match cli.command {
            Commands::Cast(args) => {
                assert_eq!(args.parameter.as_deref(), Some("Limit"));
                assert_eq!(args.raw.as_deref(), Some("20"));
            }
            other => panic!("expected cast, got {:?}", other),
        }
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("yaml"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_name("json-pretty"), Some(OutputFormat::JsonPretty));
        assert_eq!(OutputFormat::from_name("xml"), None);
    }
}
