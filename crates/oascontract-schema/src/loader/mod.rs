//! Components document loading
//!
//! Reads an OpenAPI document (or a bare `schemas` map) from YAML or JSON and
//! turns its components into schema nodes.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use oascontract_schema::loader::load_components;
//! use std::path::Path;
//!
//! let components = load_components(Path::new("petstore.yaml"))?;
//! let pet = components.reference_schema("Pet")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod resolver;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use resolver::DocumentResolver;

use crate::components::Components;
use std::path::Path;

/// Parse `path` and build its components
pub fn load_components(path: &Path) -> LoaderResult<Components> {
    let document = SchemaParser::new().parse_file(path)?;
    DocumentResolver::resolve(&document)
}
